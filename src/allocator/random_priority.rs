
use ::rand::prelude::SliceRandom;
use ::rand::rngs::StdRng;
use ::rand::SeedableRng;
use itertools::Itertools;

use crate::allocator::{Allocator, Request, RequestMatrix, Matching, AllocatorBuilderArgument};
use crate::config::ConfigurationValue;
use crate::match_object_panic;

/**
An allocator that grants requests in one shot, from the greatest to the lowest priority,
breaking priority ties randomly. Requests with equal routing priority are ordered by the packet
priority.

```ignore
RandomWithPriority{
    //Optional seed to build a new random generator independent of the simulation's global generator.
    //seed: 42
}
```
**/
pub struct RandomPriorityAllocator {
    /// The max number of inputs of the router crossbar
    num_clients: usize,
    /// The max number of outputs of the router crossbar
    num_resources: usize,
    /// The requests of the clients
    requests: RequestMatrix,
    /// The matching computed by the last allocation
    matching: Matching,
    /// The RNG or None if the seed is not set
    rng: Option<StdRng>,
}

impl RandomPriorityAllocator {
    /// Create a new random priority allocator
    /// # Parameters
    /// * `args` - The arguments for the allocator
    /// # Returns
    /// * `RandomPriorityAllocator` - The new random priority allocator
    pub fn new(args: AllocatorBuilderArgument) -> RandomPriorityAllocator {
        // Check if the arguments are valid
        if args.num_clients == 0 || args.num_resources == 0 {
            panic!("Invalid arguments for RandomPriorityAllocator")
        }
        // Get the seed from the configuration
        let mut seed = None;
        match_object_panic!(args.cv, "RandomWithPriority", value,
            "seed" => match value
            {
                &ConfigurationValue::Number(s) => seed = Some(s as u64),
                _ => panic!("Bad value for seed"),
            },
        );
        let rng = seed.map(|s| StdRng::seed_from_u64(s));
        RandomPriorityAllocator {
            num_clients: args.num_clients,
            num_resources: args.num_resources,
            requests: RequestMatrix::new(args.num_clients, args.num_resources),
            matching: Matching::new(args.num_clients, args.num_resources),
            rng,
        }
    }
}

impl Allocator for RandomPriorityAllocator {
    fn clear(&mut self) {
        self.requests.clear();
        self.matching.clear();
    }

    fn add_request(&mut self, request: Request) {
        // Check if the request is valid
        if request.client >= self.num_clients || request.resource >= self.num_resources {
            panic!("Invalid request");
        }
        self.requests.add(request);
    }

    fn pending_request(&self, client: usize, resource: usize) -> Option<&Request> {
        self.requests.get(client, resource)
    }

    /// Perform the allocation
    /// # Arguments
    /// * `rng` - The RNG to use if the seed is not set
    /// # Remarks
    /// The standing requests are shuffled and then stably ordered from the greatest to the
    /// lowest (priority, packet priority), so that ties resolve randomly. Grants are then given
    /// greedily to unmatched pairs.
    fn perform_allocation(&mut self, rng: &mut StdRng) {
        let mut pending: Vec<Request> = self.requests.iter().cloned().collect();
        // Shuffle the requests using the RNG passed as parameter
        // Except if the seed is set, in which case we use our own
        let rng = self.rng.as_mut().unwrap_or(rng);
        pending.shuffle(rng);
        for request in pending.into_iter().sorted_by(|a, b| (b.priority, b.packet_priority).cmp(&(a.priority, a.packet_priority))) {
            // Check if the wanted resource is available and the client has no resource
            if self.matching.resource_of(request.client).is_none() && self.matching.client_of(request.resource).is_none() {
                self.matching.bind(request.client, request.resource);
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

    fn new_allocator(num_clients: usize, num_resources: usize) -> RandomPriorityAllocator {
        let plugs = Plugs::default();
        let mut rng = StdRng::seed_from_u64(1u64);
        let cv = ConfigurationValue::Object("RandomWithPriority".to_string(), vec![]);
        RandomPriorityAllocator::new(AllocatorBuilderArgument {
            cv: &cv,
            num_clients,
            num_resources,
            plugs: &plugs,
            rng: &mut rng,
        })
    }

    #[test]
    fn greatest_priority_wins_the_contention() {
        let mut allocator = new_allocator(3, 1);
        let mut rng = StdRng::seed_from_u64(2u64);
        allocator.add_request(Request::new(0, 0, 0, 1, 0));
        allocator.add_request(Request::new(1, 0, 0, 9, 0));
        allocator.add_request(Request::new(2, 0, 0, 5, 0));
        allocator.perform_allocation(&mut rng);
        assert_eq!(allocator.granted_client(0), Some(1));
        assert_eq!(allocator.granted_resource(1), Some(0));
        assert_eq!(allocator.granted_resource(0), None);
        assert_eq!(allocator.granted_resource(2), None);
    }

    #[test]
    fn lower_priority_requests_fill_free_resources() {
        let mut allocator = new_allocator(2, 2);
        let mut rng = StdRng::seed_from_u64(3u64);
        allocator.add_request(Request::new(0, 0, 0, 9, 0));
        allocator.add_request(Request::new(1, 0, 0, 1, 0));
        allocator.add_request(Request::new(1, 1, 0, 1, 0));
        allocator.perform_allocation(&mut rng);
        assert_eq!(allocator.granted_resource(0), Some(0));
        assert_eq!(allocator.granted_resource(1), Some(1));
    }
}
