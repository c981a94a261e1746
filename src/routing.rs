/*!

Route sets, as computed by the lookahead routing of the upstream router.

This crate does not compute routes. The router architecture modelled here requires lookahead
routing: every head [Flit](crate::packet::Flit) arrives carrying the [RouteSet] with its legal
egress options at this router, and the virtual channel takes ownership of it at admission.

*/

use std::mem::size_of;

use crate::quantify::Quantifiable;

///A candidate egress virtual channel for a packet, at some output port.
#[derive(Debug,Clone,Copy,PartialEq,Eq)]
pub struct EgressCandidate
{
	///The virtual channel at the output port.
	pub virtual_channel: usize,
	///Priority assigned by the routing. Greater values are preferred.
	pub priority: i32,
}

///The legal egress options of a packet at a router, indexed by output port.
///An output port without candidates is not a legal egress for the packet.
#[derive(Debug,Clone)]
pub struct RouteSet
{
	///`candidates[output_port]` is the list of legal virtual channels at that port.
	candidates: Vec<Vec<EgressCandidate>>,
}

impl RouteSet
{
	pub fn new(num_outputs:usize) -> RouteSet
	{
		RouteSet{
			candidates: (0..num_outputs).map(|_|vec![]).collect(),
		}
	}
	///Declare `virtual_channel` at `output` as a legal egress with the given priority.
	pub fn add(&mut self, output:usize, virtual_channel:usize, priority:i32)
	{
		self.candidates[output].push(EgressCandidate{virtual_channel,priority});
	}
	pub fn num_outputs(&self) -> usize
	{
		self.candidates.len()
	}
	///The number of candidate virtual channels at the given output port.
	pub fn candidate_count(&self, output:usize) -> usize
	{
		self.candidates[output].len()
	}
	///The `index`-th candidate at the given output port, in insertion order.
	pub fn candidate(&self, output:usize, index:usize) -> EgressCandidate
	{
		self.candidates[output][index]
	}
	///Shorthand for a route with a single legal (output,virtual channel) pair.
	pub fn single(num_outputs:usize, output:usize, virtual_channel:usize, priority:i32) -> RouteSet
	{
		let mut route = RouteSet::new(num_outputs);
		route.add(output,virtual_channel,priority);
		route
	}
}

impl Quantifiable for RouteSet
{
	fn total_memory(&self) -> usize
	{
		size_of::<RouteSet>() + self.candidates.iter().map(|port|port.capacity()*size_of::<EgressCandidate>()).sum::<usize>()
	}
	fn print_memory_breakdown(&self)
	{
		unimplemented!();
	}
	fn forecast_total_memory(&self) -> usize
	{
		unimplemented!();
	}
}
