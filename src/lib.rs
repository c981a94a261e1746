/*!
cruce-lib
=====

This crate provides a cycle-accurate model of the datapath of a single router of an
interconnection network, centered on its switch allocation stage: deciding, every cycle, which
flits win the crossbar and advance towards their output ports under credit-based flow control.

# Usage

This crate is `cruce-lib`. To use it add `cruce-lib` to your dependencies in your project's `Cargo.toml`.

```toml
[dependencies]
cruce-lib = "0.1"
```

# Driving a router

The crate does not bring an event queue nor topology; it models one router and the driver wires
it to whatever surrounds it. Per cycle the driver inserts the arriving flits and credits and then
calls [process](router::Router::process), which returns the flits that completed the crossbar
pipeline and the credits that completed the credit pipeline this cycle.

```ignore
let mut cycle_mut = CycleMut{ rng: StdRng::seed_from_u64(42), watch: None };
for cycle in 0..limit
{
	//... router.insert(cycle,flit,port) for each arrival ...
	let output = router.process(cycle,&mut cycle_mut);
	//... deliver output.crossed_flits and output.returned_credits ...
}
```

Every head flit must arrive carrying the [RouteSet](routing::RouteSet) with its legal egress
options at this router, as computed by the lookahead routing of the upstream router. The router
performs no route computation of its own.

# Configuration Syntax

Components are described with [ConfigurationValue](config::ConfigurationValue) objects, built
programmatically. The only configuration consumer is the router builder; for example:

```ignore
InputQueued
{
	virtual_channels: 4,//queues per port, on both sides of the crossbar.
	buffer_size: 8,//flits available in each virtual channel buffer.
	allocator: Islip { num_iterations: 1 },//the matching strategy of the crossbar.
	input_speedup: 1,//expanded crossbar inputs per physical input.
	output_speedup: 1,//expanded crossbar outputs per physical output.
	sw_alloc_delay: 1,//cycles a channel matures in a state before requesting the switch.
	crossbar_delay: 0,//cycles to traverse the crossbar. In pipeline.
	credit_delay: 0,//cycles for a credit to travel back upstream.
	hold_switch_for_packet: false,//whether a packet keeps its crossbar slot until its tail.
}
```

See [`new_router`](router::new_router) and [`new_allocator`](allocator::new_allocator) for the
builders and their accepted objects.

# Plugging

The builders receive a `&Plugs` argument that may be used to provide the simulator with new
implementations of routers and allocators. This way, one can declare plugs for their implemented
`Router` or `Allocator` and select them from the configuration by name.

*/

// --- crate attributes ---
// At clippy::correctness no problem should appear
	// $(cargo clippy -- -A clippy::all -W clippy::correctness)
// At clippy::style
	// These should be partially addressed, but of very little importance.
	#![allow(clippy::needless_return)]
	#![allow(clippy::new_without_default)]
	#![allow(clippy::single_match)]
	#![allow(clippy::let_and_return)]
	#![allow(clippy::len_without_is_empty)]
	// What is the more appropriate way to iterate a couple arrays of same size, while also using the index itself?
	#![allow(clippy::needless_range_loop)]
	// I have several cases that seem cleaner without collapsing.
	#![allow(clippy::collapsible_else_if)]
	// Ignore these lints
	#![allow(clippy::match_ref_pats)]
	#![allow(clippy::tabs_in_doc_comments)]

pub use quantifiable_derive::Quantifiable;//the derive macro

pub mod config;
pub mod error;
pub mod quantify;
pub mod matrix;
pub mod packet;
pub mod routing;
pub mod pipeline;
pub mod allocator;
pub mod router;

use std::collections::BTreeMap;
use std::fmt::Debug;

use allocator::{Allocator,AllocatorBuilderArgument};
use router::{Router,RouterBuilderArgument};

pub use config::ConfigurationValue;
pub use packet::{Flit,Credit};
pub use pipeline::Time;
pub use router::{CycleMut,CycleOutput,VcState,WatchSink,WriteWatch};
pub use routing::{RouteSet,EgressCandidate};

///The collection of builder functions the user plugs into the library, to be selected from the
///configuration by object name. The builders of the crate are tried after the plugged ones.
#[derive(Default)]
pub struct Plugs
{
	routers: BTreeMap<String, fn(RouterBuilderArgument) -> Box<dyn Router> >,
	allocators: BTreeMap<String, fn(AllocatorBuilderArgument) -> Box<dyn Allocator> >,
}

impl Plugs
{
	pub fn add_router(&mut self, key:String, builder:fn(RouterBuilderArgument) -> Box<dyn Router>)
	{
		self.routers.insert(key,builder);
	}
	pub fn add_allocator(&mut self, key:String, builder:fn(AllocatorBuilderArgument) -> Box<dyn Allocator>)
	{
		self.allocators.insert(key,builder);
	}
}

impl Debug for Plugs
{
	fn fmt(&self,f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error>
	{
		write!(f,"{};",self.routers.keys().map(|s|s.to_string()).collect::<Vec<String>>().join(","))?;
		write!(f,"{};",self.allocators.keys().map(|s|s.to_string()).collect::<Vec<String>>().join(","))?;
		Ok(())
	}
}

#[cfg(test)]
mod tests
{
	use super::*;
	use ::rand::{rngs::StdRng,SeedableRng};
	use crate::router::new_router;

	#[test]
	fn build_a_router_from_a_configuration()
	{
		let plugs = Plugs::default();
		let mut rng = StdRng::seed_from_u64(10u64);
		let allocator_cv = ConfigurationValue::Object("Islip".to_string(),vec![
			("num_iterations".to_string(),ConfigurationValue::Number(1f64)),
		]);
		let router_cv = ConfigurationValue::Object("InputQueued".to_string(),vec![
			("virtual_channels".to_string(),ConfigurationValue::Number(4f64)),
			("buffer_size".to_string(),ConfigurationValue::Number(8f64)),
			("allocator".to_string(),allocator_cv),
		]);
		let router = new_router(RouterBuilderArgument{
			router_index: 0,
			cv: &router_cv,
			plugs: &plugs,
			num_inputs: 2,
			num_outputs: 2,
			rng: &mut rng,
		});
		assert_eq!( router.num_virtual_channels() , 4 );
	}

	#[test]
	#[should_panic]
	fn nonzero_routing_delay_is_rejected()
	{
		//This architecture requires lookahead routing.
		let plugs = Plugs::default();
		let mut rng = StdRng::seed_from_u64(10u64);
		let allocator_cv = ConfigurationValue::Object("Islip".to_string(),vec![]);
		let router_cv = ConfigurationValue::Object("InputQueued".to_string(),vec![
			("virtual_channels".to_string(),ConfigurationValue::Number(4f64)),
			("buffer_size".to_string(),ConfigurationValue::Number(8f64)),
			("routing_delay".to_string(),ConfigurationValue::Number(1f64)),
			("allocator".to_string(),allocator_cv),
		]);
		let _router = new_router(RouterBuilderArgument{
			router_index: 0,
			cv: &router_cv,
			plugs: &plugs,
			num_inputs: 2,
			num_outputs: 2,
			rng: &mut rng,
		});
	}
}
