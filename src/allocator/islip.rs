
use ::rand::rngs::StdRng;

use crate::allocator::{Allocator, Request, RequestMatrix, Matching, AllocatorBuilderArgument};
use crate::config::ConfigurationValue;
use crate::match_object_panic;

/**
The well-known iSLIP allocator: iterative two-phase round-robin matching.

On each iteration every unmatched resource offers a grant to the unmatched requesting client
nearest to its grant pointer, and every client with offers accepts the one nearest to its accept
pointer. Pointers advance past the accepted position, which is what gives iSLIP its strong
fairness under sustained load. The algorithm is blind to request priorities and fully
deterministic, so the `rng` of `perform_allocation` is unused.

```ignore
Islip{
    //Number of iterations to perform.
    //Defaults to 1 if omitted.
    num_iterations: 2,
}
```
**/
pub struct IslipAllocator {
    /// The max number of inputs of the router crossbar
    num_clients: usize,
    /// The max number of outputs of the router crossbar
    num_resources: usize,
    /// The number of grant/accept iterations per allocation
    num_iterations: usize,
    /// The requests of the clients
    requests: RequestMatrix,
    /// The matching computed by the last allocation
    matching: Matching,
    /// Per resource, the client at which the grant phase starts looking
    grant_pointer: Vec<usize>,
    /// Per client, the resource at which the accept phase starts looking
    accept_pointer: Vec<usize>,
}

impl IslipAllocator {
    /// Create a new iSLIP allocator
    /// # Parameters
    /// * `args` - The arguments for the allocator
    /// # Returns
    /// * `IslipAllocator` - The new iSLIP allocator
    pub fn new(args: AllocatorBuilderArgument) -> IslipAllocator {
        // Check if the arguments are valid
        if args.num_clients == 0 || args.num_resources == 0 {
            panic!("Invalid arguments for IslipAllocator")
        }
        let mut num_iterations = None;
        match_object_panic!(args.cv, "ISLIP", value,
            "num_iterations" | "num_iter" => match value
            {
                &ConfigurationValue::Number(i) => num_iterations = Some(i as usize),
                _ => panic!("Bad value for num_iterations"),
            },
        );
        let num_iterations = num_iterations.unwrap_or(1);
        if num_iterations == 0 {
            panic!("An iSLIP allocator requires at least one iteration");
        }
        IslipAllocator {
            num_clients: args.num_clients,
            num_resources: args.num_resources,
            num_iterations,
            requests: RequestMatrix::new(args.num_clients, args.num_resources),
            matching: Matching::new(args.num_clients, args.num_resources),
            grant_pointer: vec![0; args.num_resources],
            accept_pointer: vec![0; args.num_clients],
        }
    }

    /// The grant phase of one iteration
    /// # Returns
    /// * `Vec<Vec<usize>>` - Per client, the resources offering it a grant
    fn grant_phase(&self) -> Vec<Vec<usize>> {
        let mut offers: Vec<Vec<usize>> = vec![vec![]; self.num_clients];
        for resource in 0..self.num_resources {
            if self.matching.client_of(resource).is_some() {
                continue;
            }
            // The requesting unmatched client nearest to the grant pointer, round-robin
            let mut chosen: Option<usize> = None;
            let mut chosen_distance = usize::MAX;
            for client in 0..self.num_clients {
                if self.matching.resource_of(client).is_some() {
                    continue;
                }
                if self.requests.get(client, resource).is_none() {
                    continue;
                }
                let distance = (client + self.num_clients - self.grant_pointer[resource]) % self.num_clients;
                if distance < chosen_distance {
                    chosen = Some(client);
                    chosen_distance = distance;
                }
            }
            if let Some(client) = chosen {
                offers[client].push(resource);
            }
        }
        offers
    }

    /// The accept phase of one iteration
    /// # Arguments
    /// * `offers` - Per client, the resources offering it a grant
    /// # Returns
    /// * `bool` - Whether some offer was accepted
    fn accept_phase(&mut self, offers: &[Vec<usize>]) -> bool {
        let mut any_accepted = false;
        for client in 0..self.num_clients {
            if offers[client].is_empty() {
                continue;
            }
            // The offering resource nearest to the accept pointer, round-robin
            let mut chosen: Option<usize> = None;
            let mut chosen_distance = usize::MAX;
            for &resource in offers[client].iter() {
                let distance = (resource + self.num_resources - self.accept_pointer[client]) % self.num_resources;
                if distance < chosen_distance {
                    chosen = Some(resource);
                    chosen_distance = distance;
                }
            }
            let resource = chosen.expect("there was an offer");
            self.matching.bind(client, resource);
            // Advance the pointers past the matched pair
            self.grant_pointer[resource] = (client + 1) % self.num_clients;
            self.accept_pointer[client] = (resource + 1) % self.num_resources;
            any_accepted = true;
        }
        any_accepted
    }
}

impl Allocator for IslipAllocator {
    fn clear(&mut self) {
        self.requests.clear();
        self.matching.clear();
    }

    fn add_request(&mut self, request: Request) {
        self.requests.add(request);
    }

    fn pending_request(&self, client: usize, resource: usize) -> Option<&Request> {
        self.requests.get(client, resource)
    }

    fn perform_allocation(&mut self, _rng: &mut StdRng) {
        for _iteration in 0..self.num_iterations {
            let offers = self.grant_phase();
            if !self.accept_phase(&offers) {
                // No progress; further iterations would offer the exact same grants
                break;
            }
        }
    }

    fn granted_resource(&self, client: usize) -> Option<usize> {
        self.matching.resource_of(client)
    }

    fn granted_client(&self, resource: usize) -> Option<usize> {
        self.matching.client_of(resource)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Plugs;
    use rand::SeedableRng;

    fn new_islip(num_clients: usize, num_resources: usize, num_iterations: usize) -> IslipAllocator {
        let plugs = Plugs::default();
        let mut rng = StdRng::seed_from_u64(1u64);
        let cv = ConfigurationValue::Object("ISLIP".to_string(), vec![
            ("num_iterations".to_string(), ConfigurationValue::Number(num_iterations as f64)),
        ]);
        IslipAllocator::new(AllocatorBuilderArgument {
            cv: &cv,
            num_clients,
            num_resources,
            plugs: &plugs,
            rng: &mut rng,
        })
    }

    #[test]
    fn at_most_one_grant_per_side() {
        let mut allocator = new_islip(4, 4, 2);
        let mut rng = StdRng::seed_from_u64(2u64);
        // Everyone wants resource 0, plus some spread
        for client in 0..4 {
            allocator.add_request(Request::new(client, 0, 0, 0, 0));
            allocator.add_request(Request::new(client, client, 0, 0, 0));
        }
        allocator.perform_allocation(&mut rng);
        let granted: Vec<(usize, usize)> = (0..4)
            .filter_map(|client| allocator.granted_resource(client).map(|resource| (client, resource)))
            .collect();
        assert!(!granted.is_empty(), "some grant should be given");
        for &(client, resource) in granted.iter() {
            assert_eq!(allocator.granted_client(resource), Some(client));
        }
        let mut resources: Vec<usize> = granted.iter().map(|&(_, resource)| resource).collect();
        let total = resources.len();
        resources.sort();
        resources.dedup();
        assert_eq!(resources.len(), total, "no resource may be granted twice");
    }

    #[test]
    fn pointer_rotation_is_fair() {
        let mut allocator = new_islip(4, 1, 1);
        let mut rng = StdRng::seed_from_u64(3u64);
        // Four clients contending for a single resource: over four cycles each must win once.
        let mut winners = vec![];
        for _cycle in 0..4 {
            allocator.clear();
            for client in 0..4 {
                allocator.add_request(Request::new(client, 0, 0, 0, 0));
            }
            allocator.perform_allocation(&mut rng);
            winners.push(allocator.granted_client(0).expect("the resource must be granted"));
        }
        let mut sorted = winners.clone();
        sorted.sort();
        assert_eq!(sorted, vec![0, 1, 2, 3], "every client must win once in a window, got {:?}", winners);
    }

    #[test]
    fn second_iteration_completes_the_matching() {
        let mut rng = StdRng::seed_from_u64(4u64);
        // Both clients request both resources. With fresh pointers the first iteration offers
        // both resources to client 0 and leaves client 1 unserved; the second iteration fills
        // the remaining pair.
        let requests = [(0, 0), (0, 1), (1, 0), (1, 1)];
        let mut single = new_islip(2, 2, 1);
        for &(client, resource) in requests.iter() {
            single.add_request(Request::new(client, resource, 0, 0, 0));
        }
        single.perform_allocation(&mut rng);
        let matched = (0..2).filter(|&c| single.granted_resource(c).is_some()).count();
        assert_eq!(matched, 1, "one iteration leaves a pair unmatched here");
        let mut iterated = new_islip(2, 2, 2);
        for &(client, resource) in requests.iter() {
            iterated.add_request(Request::new(client, resource, 0, 0, 0));
        }
        iterated.perform_allocation(&mut rng);
        let matched = (0..2).filter(|&c| iterated.granted_resource(c).is_some()).count();
        assert_eq!(matched, 2, "both clients can be served");
    }

    #[test]
    fn granted_label_reads_the_winning_request() {
        let mut allocator = new_islip(2, 2, 1);
        let mut rng = StdRng::seed_from_u64(5u64);
        allocator.add_request(Request::new(0, 1, 3, 0, 0));
        allocator.perform_allocation(&mut rng);
        assert_eq!(allocator.granted_resource(0), Some(1));
        assert_eq!(allocator.granted_label(0, 1), Some(3));
        assert_eq!(allocator.granted_label(0, 0), None);
    }
}
