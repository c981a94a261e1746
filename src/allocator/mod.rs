/*!

An Allocator defines the interface for the matching strategy of the router crossbar.

Each cycle the switch allocation stage clears the allocator, adds one [Request] per eligible
(expanded input, expanded output) pair and calls [perform_allocation](Allocator::perform_allocation).
The resulting matching grants at most one resource per client and at most one client per resource,
and is queried with [granted_resource](Allocator::granted_resource) and
[granted_label](Allocator::granted_label) while resolving the grants.

see [`new_allocator`](fn.new_allocator.html) for documentation on the configuration syntax of predefined allocators.

*/

pub mod islip;
pub mod random_priority;

use ::rand::rngs::StdRng;

use crate::Plugs;
use crate::config::ConfigurationValue;
use crate::matrix::Matrix;
use crate::quantify::Quantifiable;
use quantifiable_derive::Quantifiable;//the derive macro

use islip::IslipAllocator;
use random_priority::RandomPriorityAllocator;

///A client (expanded input of the crossbar) wants a resource (expanded output of the crossbar)
///with a certain priority. The label identifies the virtual channel making the request and is
///echoed back with the grant.
#[derive(Clone,Debug)]
pub struct Request
{
	///The expanded input of the crossbar.
	pub client: usize,
	///The expanded output of the crossbar.
	pub resource: usize,
	///The virtual channel requesting, to be read back on grant.
	pub label: usize,
	///The priority given by the routing to the best egress candidate behind this request.
	///Greater values win. Used to choose among repeated requests for the same pair.
	pub priority: i32,
	///The priority of the requesting packet. Priority-aware allocators use it to order requests.
	pub packet_priority: i32,
}

impl Request
{
	pub fn new(client:usize, resource:usize, label:usize, priority:i32, packet_priority:i32) -> Request
	{
		Request{
			client,
			resource,
			label,
			priority,
			packet_priority,
		}
	}
}

///The standing requests of a cycle, with at most one request per (client,resource) pair.
///Adding a repeated pair keeps the request with the greatest `priority`; on ties the earliest
///addition stands.
pub struct RequestMatrix
{
	requests: Matrix<Option<Request>>,
	///The occupied (client,resource) pairs, in insertion order.
	occupied: Vec<(usize,usize)>,
}

impl RequestMatrix
{
	pub fn new(num_clients:usize, num_resources:usize) -> RequestMatrix
	{
		RequestMatrix{
			requests: Matrix::constant(None,num_clients,num_resources),
			occupied: vec![],
		}
	}
	pub fn num_clients(&self) -> usize
	{
		self.requests.get_rows()
	}
	pub fn num_resources(&self) -> usize
	{
		self.requests.get_columns()
	}
	pub fn clear(&mut self)
	{
		//Only the occupied entries need erasure, which is usually much less than the whole matrix.
		for &(client,resource) in self.occupied.iter()
		{
			*self.requests.get_mut(client,resource) = None;
		}
		self.occupied.clear();
	}
	///Insert a request, keeping the greatest priority for repeated pairs.
	pub fn add(&mut self, request:Request)
	{
		if request.client>=self.num_clients() || request.resource>=self.num_resources()
		{
			panic!("Invalid request: client {} of {}, resource {} of {}",request.client,self.num_clients(),request.resource,self.num_resources());
		}
		let client = request.client;
		let resource = request.resource;
		let replaces = match self.requests.get(client,resource)
		{
			&Some(ref previous) => request.priority > previous.priority,
			&None =>
			{
				self.occupied.push((client,resource));
				true
			},
		};
		if replaces
		{
			*self.requests.get_mut(client,resource) = Some(request);
		}
	}
	pub fn get(&self, client:usize, resource:usize) -> Option<&Request>
	{
		self.requests.get(client,resource).as_ref()
	}
	pub fn len(&self) -> usize
	{
		self.occupied.len()
	}
	///Iterate the standing requests in insertion order.
	pub fn iter(&self) -> impl Iterator<Item=&Request> + '_
	{
		self.occupied.iter().map(move |&(client,resource)| self.requests.get(client,resource).as_ref().expect("occupied entries must hold a request") )
	}
}

///A partial matching between clients and resources, as computed by an allocator.
#[derive(Quantifiable)]
pub struct Matching
{
	resource_of_client: Vec<Option<usize>>,
	client_of_resource: Vec<Option<usize>>,
}

impl Matching
{
	pub fn new(num_clients:usize, num_resources:usize) -> Matching
	{
		Matching{
			resource_of_client: vec![None;num_clients],
			client_of_resource: vec![None;num_resources],
		}
	}
	pub fn clear(&mut self)
	{
		for entry in self.resource_of_client.iter_mut()
		{
			*entry = None;
		}
		for entry in self.client_of_resource.iter_mut()
		{
			*entry = None;
		}
	}
	///Match the pair. Both sides must be unmatched.
	pub fn bind(&mut self, client:usize, resource:usize)
	{
		assert!( self.resource_of_client[client].is_none(), "client {} already matched",client );
		assert!( self.client_of_resource[resource].is_none(), "resource {} already matched",resource );
		self.resource_of_client[client] = Some(resource);
		self.client_of_resource[resource] = Some(client);
	}
	pub fn resource_of(&self, client:usize) -> Option<usize>
	{
		self.resource_of_client[client]
	}
	pub fn client_of(&self, resource:usize) -> Option<usize>
	{
		self.client_of_resource[resource]
	}
}

/**
An Allocator manages the requests from a set of clients (expanded inputs) over a set of resources
(expanded outputs). Requests are added via `add_request` and a call to `perform_allocation`
computes a matching, queried afterwards via `granted_resource` and relatives. The state persists
until the next call to `clear`, so the resolution of the grants can still read the requests.

unrelated to `std::alloc::Allocator`.
**/
pub trait Allocator
{
	///Forget all the requests and grants of the previous cycle.
	fn clear(&mut self);
	///Add a new request to the allocator. For a repeated (client,resource) pair only the request
	///with the greatest priority stands.
	fn add_request(&mut self, request:Request);
	///The request currently standing for the pair, if any. The fast path of the switch
	///allocation uses it to detect slots already claimed by the slow path.
	fn pending_request(&self, client:usize, resource:usize) -> Option<&Request>;
	///Compute a matching among the standing requests: at most one grant per client and at most
	///one grant per resource.
	/// # Parameters
	/// * `rng` - The random number generator used by allocators that break ties randomly.
	fn perform_allocation(&mut self, rng:&mut StdRng);
	///The resource granted to the client, if any.
	fn granted_resource(&self, client:usize) -> Option<usize>;
	///The client the resource was granted to, if any.
	fn granted_client(&self, resource:usize) -> Option<usize>;
	///The label (requesting virtual channel) of the granted request of the pair.
	fn granted_label(&self, client:usize, resource:usize) -> Option<usize>
	{
		if self.granted_resource(client)==Some(resource)
		{
			self.pending_request(client,resource).map(|request|request.label)
		}
		else
		{
			None
		}
	}
}

///Arguments for the allocator builder
#[non_exhaustive]
pub struct AllocatorBuilderArgument<'a>
{
	///A ConfigurationValue::Object defining the allocator
	pub cv : &'a ConfigurationValue,
	///The number of inputs of the router crossbar
	pub num_clients : usize,
	///The number of outputs of the router crossbar
	pub num_resources : usize,
	///A reference to the Plugs object
	pub plugs : &'a Plugs,
	///The random number generator to use
	pub rng : &'a mut StdRng,
}

/**
Build an allocator from a `ConfigurationValue::Object`.

The well-known iSLIP allocator: iterative round-robin matching, blind to priorities.
```ignore
Islip{
	//Number of iterations to perform.
	//Defaults to 1 if omitted.
	num_iterations: 2,
}
```

The `RandomWithPriority` allocator grants in one shot from the greatest to the lowest priority,
breaking ties randomly.
```ignore
RandomWithPriority{
	//Optional seed to build a random generator independent of the simulation's global generator.
	//seed: 42
}
```
**/
pub fn new_allocator(arg:AllocatorBuilderArgument) -> Box<dyn Allocator>
{
	if let &ConfigurationValue::Object(ref cv_name, ref _cv_pairs) = arg.cv
	{
		if let Some(builder) = arg.plugs.allocators.get(cv_name)
		{
			return builder(arg)
		};
		match cv_name.as_ref()
		{
			"RandomWithPriority" => Box::new(RandomPriorityAllocator::new(arg)),
			"Islip" | "iSLIP" =>
			{
				let mut cv = arg.cv.clone();
				cv.rename("ISLIP".into());
				let alias = AllocatorBuilderArgument{cv:&cv,..arg};
				Box::new(IslipAllocator::new(alias))
			}
			"ISLIP" => Box::new(IslipAllocator::new(arg)),
			_ => panic!("Unknown allocator: {}", cv_name),
		}
	}
	else
	{
		panic!("Trying to create an Allocator from a non-Object");
	}
}

#[cfg(test)]
mod tests
{
	use super::*;
	#[test]
	fn repeated_pair_keeps_greatest_priority()
	{
		//Two virtual channels of the same input requesting the same output with priorities 5
		//and 9. Only the priority 9 request may stand.
		let mut matrix = RequestMatrix::new(2,2);
		matrix.add(Request::new(0,0,0,5,0));
		matrix.add(Request::new(0,0,1,9,0));
		assert_eq!( matrix.len() , 1 );
		let standing = matrix.get(0,0).expect("there should be a request");
		assert_eq!( standing.priority , 9 );
		assert_eq!( standing.label , 1 );
		//And a lower priority does not displace it.
		matrix.add(Request::new(0,0,2,7,0));
		assert_eq!( matrix.get(0,0).unwrap().label , 1 );
		//On priority ties the first request stands.
		matrix.add(Request::new(0,0,3,9,0));
		assert_eq!( matrix.get(0,0).unwrap().label , 1 );
	}
	#[test]
	fn matching_binds_both_sides()
	{
		let mut matching = Matching::new(2,3);
		matching.bind(1,2);
		assert_eq!( matching.resource_of(1) , Some(2) );
		assert_eq!( matching.client_of(2) , Some(1) );
		assert_eq!( matching.resource_of(0) , None );
		assert_eq!( matching.client_of(0) , None );
	}
}
