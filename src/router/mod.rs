/*!

A Router receives flits by its input ports and sends them through its output ports, deciding each
cycle which flits cross the crossbar. This module contains the pieces every router architecture
shares: the input buffers with their virtual channel state, the occupancy trackers of the
downstream buffers, and the per-cycle interface.

The only router currently implemented is [InputQueued](input_queued::InputQueued), see
[`new_router`](fn.new_router.html) for its configuration syntax.

*/

pub mod input_queued;

use std::collections::VecDeque;
use std::io::Write;
use std::mem::size_of;

use ::rand::rngs::StdRng;

use crate::config::ConfigurationValue;
use crate::error::Error;
use crate::error;
use crate::packet::{Flit,Credit};
use crate::pipeline::Time;
use crate::quantify::Quantifiable;
use crate::routing::RouteSet;
use crate::Plugs;

use input_queued::InputQueued;

///The phase a virtual channel is in. The output binding only exists while the channel is
///active, so no illegal combination of state and binding can be represented.
#[derive(Clone,Copy,Debug,PartialEq,Eq)]
pub enum VcState
{
	///No packet owns the channel.
	Idle,
	///The packet at the head of the channel still needs an output virtual channel.
	VcAlloc,
	///The packet has its egress committed; every flit goes to that same place.
	Active{ output_port:usize, output_vc:usize },
}

///One virtual channel of an input port: a queue of flits plus the state of the packet at its head.
struct VirtualChannel
{
	queue: VecDeque<Flit>,
	state: VcState,
	///The cycle the current state was entered.
	state_entry: Time,
	///The egress options of the packet currently owning the channel, taken from its head flit.
	route: Option<RouteSet>,
	///The priority of the packet currently owning the channel.
	priority: i32,
}

impl VirtualChannel
{
	fn new() -> VirtualChannel
	{
		VirtualChannel{
			queue: VecDeque::new(),
			state: VcState::Idle,
			state_entry: 0,
			route: None,
			priority: 0,
		}
	}
}

///The reception side of an input port: `virtual_channels` queues of flits with their states.
pub struct Buffer
{
	///The port this buffer belongs to. Only for messages.
	input_port: usize,
	virtual_channels: Vec<VirtualChannel>,
}

impl Buffer
{
	pub fn new(input_port:usize, virtual_channels:usize) -> Buffer
	{
		Buffer{
			input_port,
			virtual_channels: (0..virtual_channels).map(|_|VirtualChannel::new()).collect(),
		}
	}
	pub fn num_virtual_channels(&self) -> usize
	{
		self.virtual_channels.len()
	}
	pub fn state(&self, virtual_channel:usize) -> VcState
	{
		self.virtual_channels[virtual_channel].state
	}
	///Cycles spent in the current state.
	pub fn state_time(&self, virtual_channel:usize, current_cycle:Time) -> Time
	{
		current_cycle - self.virtual_channels[virtual_channel].state_entry
	}
	pub fn set_state(&mut self, virtual_channel:usize, state:VcState, current_cycle:Time)
	{
		let channel = &mut self.virtual_channels[virtual_channel];
		if let VcState::Idle = state
		{
			//The route belonged to the packet that just left.
			channel.route = None;
		}
		channel.state = state;
		channel.state_entry = current_cycle;
	}
	pub fn is_empty(&self, virtual_channel:usize) -> bool
	{
		self.virtual_channels[virtual_channel].queue.is_empty()
	}
	///Number of flits currently stored in the channel.
	pub fn len(&self, virtual_channel:usize) -> usize
	{
		self.virtual_channels[virtual_channel].queue.len()
	}
	pub fn front_flit(&self, virtual_channel:usize) -> Option<&Flit>
	{
		self.virtual_channels[virtual_channel].queue.front()
	}
	pub fn remove_front_flit(&mut self, virtual_channel:usize) -> Result<Flit,Error>
	{
		let input_port = self.input_port;
		self.virtual_channels[virtual_channel].queue.pop_front().ok_or_else(||error!(empty_virtual_channel,input_port,virtual_channel))
	}
	///Store an arriving flit in the channel it travels by. If the channel was idle and empty and
	///the flit is a head, its packet is admitted right away; otherwise admission waits until the
	///preceding packet leaves (see [admit_head](Buffer::admit_head)).
	pub fn insert_flit(&mut self, flit:Flit, current_cycle:Time)
	{
		let virtual_channel = flit.virtual_channel;
		if virtual_channel >= self.virtual_channels.len()
		{
			panic!("Flit {} arrived at port {} by virtual channel {} of {}",flit.id,self.input_port,virtual_channel,self.virtual_channels.len());
		}
		let fresh = self.virtual_channels[virtual_channel].queue.is_empty() && self.virtual_channels[virtual_channel].state==VcState::Idle;
		self.virtual_channels[virtual_channel].queue.push_back(flit);
		if fresh && self.virtual_channels[virtual_channel].queue.front().expect("just inserted").head
		{
			self.admit_head(virtual_channel,current_cycle);
		}
	}
	///Make the packet at the head of the channel the owner of the channel: take its route set,
	///record its priority, and enter the `VcAlloc` state. The channel must be idle and the front
	///flit a head carrying a route.
	pub fn admit_head(&mut self, virtual_channel:usize, current_cycle:Time)
	{
		let input_port = self.input_port;
		let channel = &mut self.virtual_channels[virtual_channel];
		assert_eq!( channel.state, VcState::Idle, "admitting a packet on a busy channel {} at port {}",virtual_channel,input_port );
		let front = channel.queue.front_mut().unwrap_or_else(||panic!("admitting a packet on the empty channel {} at port {}",virtual_channel,input_port));
		if !front.head
		{
			panic!("The flit {} at the head of channel {} of port {} is not a packet head",front.id,virtual_channel,input_port);
		}
		channel.route = Some( front.route.take().unwrap_or_else(||panic!("Head flit {} arrived without a route; this architecture requires lookahead routing",front.id)) );
		channel.priority = front.priority;
		channel.state = VcState::VcAlloc;
		channel.state_entry = current_cycle;
	}
	///The route of the packet owning the channel. Panics on channels without an admitted packet.
	pub fn route_set(&self, virtual_channel:usize) -> &RouteSet
	{
		self.virtual_channels[virtual_channel].route.as_ref().unwrap_or_else(||panic!("Channel {} of port {} has no route",virtual_channel,self.input_port))
	}
	///The priority of the packet owning the channel.
	pub fn priority(&self, virtual_channel:usize) -> i32
	{
		self.virtual_channels[virtual_channel].priority
	}
}

impl Quantifiable for Buffer
{
	fn total_memory(&self) -> usize
	{
		size_of::<Buffer>() + self.virtual_channels.iter().map(|channel|{
			size_of::<VirtualChannel>()
			+ channel.queue.iter().map(|flit|flit.total_memory()).sum::<usize>()
			+ channel.route.as_ref().map_or(0,|route|route.total_memory())
		}).sum::<usize>()
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

/**
Tracker of the buffer space of the router downstream of an output port, fed by the returning
credits. This is the only information the switch allocation may use about the neighbour.

A virtual channel is `available` while no packet holds it; it is taken by
[reserve](BufferState::reserve) when a virtual channel allocation commits to it and released when
the tail flit of the packet is sent. Occupancy increases with each sent flit and decreases with
each returned credit.
**/
pub struct BufferState
{
	///The port this tracker watches. Only for messages.
	output_port: usize,
	///Capacity of each single virtual channel buffer, in flits.
	buffer_size: usize,
	///Whether some packet holds each virtual channel.
	in_use: Vec<bool>,
	///Flits sent and not yet credited back, per virtual channel.
	occupancy: Vec<usize>,
}

impl BufferState
{
	pub fn new(output_port:usize, virtual_channels:usize, buffer_size:usize) -> BufferState
	{
		if buffer_size==0
		{
			panic!("buffer_size must be greater than 0");
		}
		BufferState{
			output_port,
			buffer_size,
			in_use: vec![false;virtual_channels],
			occupancy: vec![0;virtual_channels],
		}
	}
	///Whether the virtual channel can receive a new packet.
	pub fn is_available_for(&self, virtual_channel:usize) -> bool
	{
		!self.in_use[virtual_channel]
	}
	///Whether the virtual channel has no space for another flit.
	pub fn is_full_for(&self, virtual_channel:usize) -> bool
	{
		self.occupancy[virtual_channel] >= self.buffer_size
	}
	///Commit the virtual channel to a packet.
	pub fn reserve(&mut self, virtual_channel:usize)
	{
		assert!( !self.in_use[virtual_channel], "reserving the busy channel {} at output {}",virtual_channel,self.output_port );
		self.in_use[virtual_channel] = true;
	}
	///Account a flit sent to the downstream buffer. The flit must already carry its egress
	///virtual channel. The channel is released when the tail goes by.
	pub fn record_send(&mut self, flit:&Flit)
	{
		let virtual_channel = flit.virtual_channel;
		assert!( self.in_use[virtual_channel], "sending by channel {} at output {} without having reserved it",virtual_channel,self.output_port );
		assert!( !self.is_full_for(virtual_channel), "sending to the full channel {} at output {}",virtual_channel,self.output_port );
		self.occupancy[virtual_channel] += 1;
		if flit.tail
		{
			self.in_use[virtual_channel] = false;
		}
	}
	///Account a credit returned by the downstream router.
	pub fn process_credit(&mut self, virtual_channel:usize)
	{
		assert!( self.occupancy[virtual_channel]>0, "credit for channel {} at output {} without outstanding flits",virtual_channel,self.output_port );
		self.occupancy[virtual_channel] -= 1;
	}
	pub fn occupancy(&self, virtual_channel:usize) -> usize
	{
		self.occupancy[virtual_channel]
	}
}

impl Quantifiable for BufferState
{
	fn total_memory(&self) -> usize
	{
		size_of::<BufferState>() + self.in_use.total_memory() + self.occupancy.total_memory()
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

///Destination of the diagnostic annotations of flits with the watch flag set. An optional
///capability of the cycle, with no effect whatsoever on the allocation itself.
pub trait WatchSink
{
	///Called when something notable happens to a watched flit.
	fn flit_note(&mut self, cycle:Time, flit:&Flit, note:&str);
}

///A WatchSink writing one line per event, in the spirit of a classical trace file.
pub struct WriteWatch<W:Write>
{
	output: W,
}

impl<W:Write> WriteWatch<W>
{
	pub fn new(output:W) -> WriteWatch<W>
	{
		WriteWatch{
			output,
		}
	}
	pub fn into_inner(self) -> W
	{
		self.output
	}
}

impl<W:Write> WatchSink for WriteWatch<W>
{
	fn flit_note(&mut self, cycle:Time, flit:&Flit, note:&str)
	{
		writeln!(self.output,"{} | flit {} | {}",cycle,flit.id,note).expect("failed writing the watch trace");
	}
}

///The mutable resources a router may employ during a cycle, besides itself.
pub struct CycleMut<'a>
{
	///The random number generator, used by some allocators.
	pub rng: StdRng,
	///Where to annotate the events of watched flits, if anywhere.
	pub watch: Option<&'a mut dyn WatchSink>,
}

///What a cycle moved out of the router: the flits that completed the crossbar pipeline, by
///expanded output, and the credits that completed the credit pipeline, by input port. Wiring
///them to the neighbour routers is the task of the driver.
#[derive(Default)]
pub struct CycleOutput
{
	pub crossed_flits: Vec<(usize,Flit)>,
	pub returned_credits: Vec<(usize,Credit)>,
}

///A router as seen by the driver of the simulation.
pub trait Router : Quantifiable
{
	///Receive a flit by the input `port`.
	fn insert(&mut self, current_cycle:Time, flit:Flit, port:usize);
	///Receive a credit returned by the router downstream of the output `port`.
	fn acknowledge(&mut self, current_cycle:Time, port:usize, credit:Credit);
	///Execute a whole allocation cycle: build requests, allocate the crossbar, resolve the
	///grants, and advance the pipelines.
	fn process(&mut self, cycle:Time, mutable:&mut CycleMut) -> CycleOutput;
	fn num_virtual_channels(&self) -> usize;
	///Current statistics of the router as a configuration object.
	fn aggregate_statistics(&self, cycle:Time) -> ConfigurationValue;
	fn reset_statistics(&mut self, next_cycle:Time);
}

///Arguments for the router builder.
pub struct RouterBuilderArgument<'a>
{
	///The index of the router being created.
	pub router_index: usize,
	///A ConfigurationValue::Object defining the router.
	pub cv: &'a ConfigurationValue,
	///The user defined plugs. In case the router needs to create some allocator.
	pub plugs: &'a Plugs,
	///Number of input ports.
	pub num_inputs: usize,
	///Number of output ports.
	pub num_outputs: usize,
	///The random number generator to use.
	pub rng: &'a mut StdRng,
}

/**
Build a router from a `ConfigurationValue::Object`.

```ignore
InputQueued{
	virtual_channels: 4,
	buffer_size: 8,
	allocator: Islip { num_iterations: 1 },
	//input_speedup: 1,
	//output_speedup: 1,
	//sw_alloc_delay: 1,
	//routing_delay: 0,//must be 0, this architecture requires lookahead routing.
	//crossbar_delay: 0,
	//credit_delay: 0,
	//hold_switch_for_packet: false,
}
```
**/
pub fn new_router(arg:RouterBuilderArgument) -> Box<dyn Router>
{
	if let &ConfigurationValue::Object(ref cv_name, ref _cv_pairs) = arg.cv
	{
		if let Some(builder) = arg.plugs.routers.get(cv_name)
		{
			return builder(arg);
		}
		match cv_name.as_ref()
		{
			"InputQueued" => Box::new(InputQueued::new(arg)),
			_ => panic!("Unknown router: {}",cv_name),
		}
	}
	else
	{
		panic!("Trying to create a Router from a non-Object");
	}
}
