/*!

The units travelling through the router: flits forward and credits backward.

A flit is owned by exactly one container at a time. It sits in a virtual channel of an input
[Buffer](crate::router::Buffer) until a switch grant moves it into the crossbar
[Pipeline](crate::pipeline::Pipeline), which later hands it to whoever drives the router. There is
no shared ownership; every transfer is a move.

*/

use std::mem::size_of;

use crate::pipeline::Time;
use crate::quantify::Quantifiable;
use crate::routing::RouteSet;

///A flow control unit of a packet.
#[derive(Debug,Clone)]
pub struct Flit
{
	///An identifier, unique while the flit is in flight. Only employed by diagnostics.
	pub id: usize,
	///Index of the packet the flit belongs to.
	pub packet_index: usize,
	///The virtual channel the flit is currently travelling by. Rewritten to the egress virtual
	///channel when the flit crosses the switch.
	pub virtual_channel: usize,
	///Priority of the packet, as assigned at injection. Greater values are preferred by the
	///switch allocation.
	pub priority: i32,
	///Whether this is the first flit of its packet.
	pub head: bool,
	///Whether this is the last flit of its packet.
	pub tail: bool,
	///Number of routers the flit has crossed.
	pub hops: usize,
	///The router that sent the flit here, to which its credit must return.
	pub from_router: usize,
	///The router at which the packet is to be consumed.
	pub destination_router: usize,
	///Whether diagnostic annotations should be emitted for this flit.
	pub watch: bool,
	///For head flits, the egress options at this router as computed by the lookahead routing of
	///the upstream router. Taken by the virtual channel at admission, so a flit extracted from
	///the crossbar no longer carries it.
	pub route: Option<RouteSet>,
	///The cycle the flit was created, for delay accounting by the driver.
	pub creation_cycle: Time,
}

impl Quantifiable for Flit
{
	fn total_memory(&self) -> usize
	{
		size_of::<Flit>() + match self.route
		{
			Some(ref route) => route.total_memory() - size_of::<RouteSet>(),
			None => 0,
		}
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

///Notice travelling upstream that input buffer slots have been freed. One credit is built per
///input port and cycle, batching all the virtual channels that released a flit in that cycle.
#[derive(Debug,Clone,Default)]
pub struct Credit
{
	///The virtual channels freed this cycle at the emitting input port.
	pub virtual_channels: Vec<usize>,
	///The router the credit must return to: the one that sent the transferred flits.
	pub destination_router: usize,
}

impl Quantifiable for Credit
{
	fn total_memory(&self) -> usize
	{
		size_of::<Credit>() + self.virtual_channels.capacity()*size_of::<usize>()
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
