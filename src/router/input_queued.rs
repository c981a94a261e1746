
use std::collections::VecDeque;
use std::mem::size_of;

use super::{Router,RouterBuilderArgument,Buffer,BufferState,VcState,CycleMut,CycleOutput,WatchSink};
use crate::allocator::{Allocator,Request,AllocatorBuilderArgument,new_allocator};
use crate::config::ConfigurationValue;
use crate::packet::{Flit,Credit};
use crate::pipeline::{Pipeline,Time};
use crate::quantify::Quantifiable;
use crate::match_object_panic;

/**
An input-queued router whose switch allocation distinguishes a slow path from a fast path.

Every cycle the eligible virtual channels request crossbar slots to a pluggable
[Allocator](crate::allocator::Allocator). Channels needing full arbitration go through the slow
path, which scans them round-robin per expanded input. Channels flagged as fast-path, typically
the ones that have been enjoying exclusive use of a crossbar slot, are issued afterwards so they
can yield to any slow-path request standing on the same slot; this skips most of the per-output
rescanning for the common case of a single busy channel per input without changing which grants
are possible.

Physical ports are expanded by the input and output speedups: input `i` offers its channel `v` to
the expanded input `i*input_speedup + v%input_speedup`, and output `o` receives from input `i` by
the expanded output `o*output_speedup + i%output_speedup`.

When `hold_switch_for_packet` is set, a granted transfer binds its expanded input to its expanded
output and channel until the tail flit goes by, so the rest of the packet does not arbitrate
again. Held slots are excluded from request building on both sides.

The resolution of a grant whose channel is still in the `VcAlloc` state performs the virtual
channel allocation in place: the egress candidate with the greatest priority among the available
and non-full ones is taken, and the transfer proceeds in the same cycle.
**/
pub struct InputQueued
{
	///Its index in the network.
	router_index: usize,
	///The cycle number of the last time InputQueued::process was called. Only for debugging/assertion purposes.
	last_process_at_cycle: Option<Time>,
	///Number of virtual channels per port.
	virtual_channels: usize,
	///Number of input ports.
	num_inputs: usize,
	///Number of output ports.
	num_outputs: usize,
	///Each input port feeds this many expanded inputs of the crossbar.
	input_speedup: usize,
	///Each output port drains this many expanded outputs of the crossbar.
	output_speedup: usize,
	///Cycles a channel must stay in a state before the switch allocation considers it. Models
	///the pipelining between the allocation stages.
	sw_alloc_delay: Time,
	///Whether a packet keeps its crossbar slot until its tail flit crosses.
	hold_switch_for_packet: bool,
	///Size of each virtual channel buffer, here and downstream, in flits.
	buffer_size: usize,
	///`buffers[input]` has the queues and states of the channels of that input port.
	buffers: Vec<Buffer>,
	///`next_buffers[output]` tracks the occupancy of the downstream buffers of that output.
	next_buffers: Vec<BufferState>,
	///The allocator for the crossbar.
	sw_allocator: Box<dyn Allocator>,
	///`vc_rr_offset[input][vc]`: output port at which the channel starts scanning, rotated on
	///each virtual channel allocation for fairness among outputs.
	vc_rr_offset: Vec<Vec<usize>>,
	///`sw_rr_offset[expanded_input]`: channel at which the slow path starts scanning, rotated on
	///each slow-path transfer for fairness among the channels sharing the expanded input.
	sw_rr_offset: Vec<usize>,
	///`use_fast_path[input][vc]`: whether the channel may skip full arbitration this cycle.
	use_fast_path: Vec<Vec<bool>>,
	///`switch_hold_in[expanded_input]`: the (expanded output, channel) this input is bound to.
	switch_hold_in: Vec<Option<(usize,usize)>>,
	///`switch_hold_out[expanded_output]`: the expanded input this output is bound to.
	switch_hold_out: Vec<Option<usize>>,
	///Channels that went idle on a tail departure with more flits waiting. Their next packet is
	///admitted at the beginning of the following cycle.
	pending_vcs: VecDeque<(usize,usize)>,
	///Conduit of the flits that won the switch, one slot per expanded output.
	crossbar_pipeline: Pipeline<Flit>,
	///Conduit of the credits going back upstream, one slot per input port.
	credit_pipeline: Pipeline<Credit>,

	//statistics:
	///The first cycle included in the statistics.
	statistics_begin_cycle: Time,
	///Flits that crossed the switch, per output port.
	statistics_crossed_flits: Vec<u64>,
	///Credits written to the credit pipeline, per input port.
	statistics_emitted_credits: Vec<u64>,
}

impl Router for InputQueued
{
	fn insert(&mut self, current_cycle:Time, flit:Flit, port:usize)
	{
		if self.buffers[port].len(flit.virtual_channel) >= self.buffer_size
		{
			panic!("Flit {} arrived at the full channel {} of input {}; the upstream router is ignoring credits",flit.id,flit.virtual_channel,port);
		}
		self.buffers[port].insert_flit(flit,current_cycle);
	}
	fn acknowledge(&mut self, _current_cycle:Time, port:usize, credit:Credit)
	{
		for &virtual_channel in credit.virtual_channels.iter()
		{
			self.next_buffers[port].process_credit(virtual_channel);
		}
	}
	fn process(&mut self, cycle:Time, mutable:&mut CycleMut) -> CycleOutput
	{
		if let Some(last) = self.last_process_at_cycle
		{
			if last >= cycle
			{
				panic!("Trying to process at cycle {} a router::InputQueued already processed at {}",cycle,last);
			}
		}
		self.last_process_at_cycle = Some(cycle);

		//-- Admit the next packet of the channels released in previous cycles.
		while let Some((input,virtual_channel)) = self.pending_vcs.pop_front()
		{
			self.buffers[input].admit_head(virtual_channel,cycle);
		}

		//-- Build the requests and allocate the crossbar.
		let mut fast_path_vcs : Vec<Option<usize>> = vec![None;self.num_inputs];
		self.sw_allocator.clear();
		for input in 0..self.num_inputs
		{
			for s in 0..self.input_speedup
			{
				self.build_slow_path_requests(cycle,input,s,mutable);
			}
			//Fast-path flits are handled afterwards, so we know all switch requests from other
			//channels on the regular path have been issued already.
			self.build_fast_path_requests(cycle,input,&mut fast_path_vcs,mutable);
		}
		self.sw_allocator.perform_allocation(&mut mutable.rng);

		//-- Winning flits cross the switch.
		for input in 0..self.num_inputs
		{
			self.resolve_input(cycle,input,&fast_path_vcs,mutable);
		}

		CycleOutput{
			crossed_flits: self.crossbar_pipeline.advance(),
			returned_credits: self.credit_pipeline.advance(),
		}
	}
	fn num_virtual_channels(&self) -> usize
	{
		self.virtual_channels
	}
	fn aggregate_statistics(&self, cycle:Time) -> ConfigurationValue
	{
		let cycle_span = cycle - self.statistics_begin_cycle;
		let divisor = if cycle_span==0 { 1f64 } else { cycle_span as f64 };
		let crossed = self.statistics_crossed_flits.iter().map(|&count|ConfigurationValue::Number(count as f64/divisor)).collect();
		let credits = self.statistics_emitted_credits.iter().map(|&count|ConfigurationValue::Number(count as f64/divisor)).collect();
		ConfigurationValue::Object(String::from("InputQueued"),vec![
			(String::from("average_crossed_flits_per_output"),ConfigurationValue::Array(crossed)),
			(String::from("average_emitted_credits_per_input"),ConfigurationValue::Array(credits)),
		])
	}
	fn reset_statistics(&mut self, next_cycle:Time)
	{
		self.statistics_begin_cycle = next_cycle;
		for x in self.statistics_crossed_flits.iter_mut()
		{
			*x = 0;
		}
		for x in self.statistics_emitted_credits.iter_mut()
		{
			*x = 0;
		}
	}
}

impl InputQueued
{
	pub fn new(arg:RouterBuilderArgument) -> InputQueued
	{
		let RouterBuilderArgument{
			router_index,
			cv,
			plugs,
			num_inputs,
			num_outputs,
			..
		} = arg;
		let mut virtual_channels = None;
		let mut buffer_size = None;
		let mut allocator_value = None;
		let mut input_speedup = 1;
		let mut output_speedup = 1;
		let mut sw_alloc_delay : Time = 1;
		let mut routing_delay : Time = 0;
		let mut crossbar_delay : Time = 0;
		let mut credit_delay : Time = 0;
		let mut hold_switch_for_packet = false;
		match_object_panic!(cv,"InputQueued",value,
			"virtual_channels" => match value
			{
				&ConfigurationValue::Number(f) => virtual_channels=Some(f as usize),
				_ => panic!("bad value for virtual_channels"),
			},
			"buffer_size" => match value
			{
				&ConfigurationValue::Number(f) => buffer_size=Some(f as usize),
				_ => panic!("bad value for buffer_size"),
			},
			"allocator" => allocator_value=Some(value.clone()),
			"input_speedup" => input_speedup = value.as_usize().expect("bad value for input_speedup"),
			"output_speedup" => output_speedup = value.as_usize().expect("bad value for output_speedup"),
			"sw_alloc_delay" => sw_alloc_delay = value.as_time().expect("bad value for sw_alloc_delay"),
			"routing_delay" => routing_delay = value.as_time().expect("bad value for routing_delay"),
			"crossbar_delay" | "delay" => crossbar_delay = value.as_time().expect("bad value for crossbar_delay"),
			"credit_delay" => credit_delay = value.as_time().expect("bad value for credit_delay"),
			"hold_switch_for_packet" => hold_switch_for_packet = value.as_bool().expect("bad value for hold_switch_for_packet"),
		);
		let virtual_channels = virtual_channels.expect("There were no virtual_channels");
		let buffer_size = buffer_size.expect("There were no buffer_size");
		if routing_delay != 0
		{
			panic!("This router architecture requires lookahead routing! routing_delay must be 0, got {}.",routing_delay);
		}
		if input_speedup==0 || output_speedup==0
		{
			panic!("speedup factors must be at least 1");
		}
		if virtual_channels % input_speedup != 0
		{
			panic!("input_speedup ({}) must divide the number of virtual channels ({})",input_speedup,virtual_channels);
		}
		let allocator = new_allocator(AllocatorBuilderArgument{
			cv: &allocator_value.expect("There were no allocator"),
			num_clients: num_inputs*input_speedup,
			num_resources: num_outputs*output_speedup,
			plugs,
			rng: arg.rng,
		});
		let buffers = (0..num_inputs).map(|input|Buffer::new(input,virtual_channels)).collect();
		let next_buffers = (0..num_outputs).map(|output|BufferState::new(output,virtual_channels,buffer_size)).collect();
		//Each expanded input starts scanning at its own congruence class of channels.
		let sw_rr_offset = (0..num_inputs*input_speedup).map(|expanded_input|expanded_input%input_speedup).collect();
		InputQueued{
			router_index,
			last_process_at_cycle: None,
			virtual_channels,
			num_inputs,
			num_outputs,
			input_speedup,
			output_speedup,
			sw_alloc_delay,
			hold_switch_for_packet,
			buffer_size,
			buffers,
			next_buffers,
			sw_allocator: allocator,
			vc_rr_offset: vec![ vec![0;virtual_channels] ; num_inputs ],
			sw_rr_offset,
			use_fast_path: vec![ vec![true;virtual_channels] ; num_inputs ],
			switch_hold_in: vec![ None ; num_inputs*input_speedup ],
			switch_hold_out: vec![ None ; num_outputs*output_speedup ],
			pending_vcs: VecDeque::new(),
			crossbar_pipeline: Pipeline::new(crossbar_delay,num_outputs*output_speedup),
			credit_pipeline: Pipeline::new(credit_delay,num_inputs),
			statistics_begin_cycle: 0,
			statistics_crossed_flits: vec![0;num_outputs],
			statistics_emitted_credits: vec![0;num_inputs],
		}
	}
	///Whether the channel state and its time in it allow requesting the switch this cycle.
	fn is_ready(&self, cycle:Time, input:usize, virtual_channel:usize) -> bool
	{
		let state = self.buffers[input].state(virtual_channel);
		let eligible_state = match state
		{
			VcState::VcAlloc | VcState::Active{..} => true,
			VcState::Idle => false,
		};
		eligible_state && self.buffers[input].state_time(virtual_channel,cycle) >= self.sw_alloc_delay
	}
	///The greatest priority among the egress candidates of the channel at the given output that
	///could receive its flit right now, if any. For a channel in `VcAlloc` a candidate must be
	///free for a new packet; for an active channel only its committed egress counts. Either way
	///the downstream buffer must have room.
	fn eligible_priority(&self, input:usize, virtual_channel:usize, output:usize) -> Option<i32>
	{
		let state = self.buffers[input].state(virtual_channel);
		let route = self.buffers[input].route_set(virtual_channel);
		let dest = &self.next_buffers[output];
		let candidate_count = route.candidate_count(output);
		if let VcState::Active{..} = state
		{
			assert!( candidate_count>0, "active channel {} at input {} of router {} has no candidates at its own output {}",virtual_channel,input,self.router_index,output );
		}
		let mut best : Option<i32> = None;
		for index in 0..candidate_count
		{
			let candidate = route.candidate(output,index);
			match state
			{
				VcState::VcAlloc =>
				{
					if !dest.is_available_for(candidate.virtual_channel)
					{
						continue;
					}
				},
				VcState::Active{output_vc,..} =>
				{
					if candidate.virtual_channel != output_vc
					{
						continue;
					}
				},
				VcState::Idle => panic!("building requests for an idle channel"),
			}
			if dest.is_full_for(candidate.virtual_channel)
			{
				continue;
			}
			if best.map_or(true,|value|candidate.priority>value)
			{
				best = Some(candidate.priority);
			}
		}
		best
	}
	///The slow path of the request building: scan the channels of the expanded input `s` of
	///`input` round-robin, skipping the ones on the fast path, and request every crossbar slot
	///their flits could use. Slots consumed by a standing switch hold are skipped.
	fn build_slow_path_requests(&mut self, cycle:Time, input:usize, s:usize, mutable:&mut CycleMut)
	{
		let expanded_input = input*self.input_speedup + s;
		let mut virtual_channel = self.sw_rr_offset[expanded_input];
		assert_eq!( virtual_channel%self.input_speedup , s , "the round-robin offset escaped its congruence class" );
		for _round in 0..self.virtual_channels
		{
			if !self.use_fast_path[input][virtual_channel] && !self.buffers[input].is_empty(virtual_channel)
			{
				if self.is_ready(cycle,input,virtual_channel)
				{
					if let Some(front) = self.buffers[input].front_flit(virtual_channel)
					{
						if front.watch
						{
							watch_note(mutable,cycle,front,&format!("channel {} at input {} requesting slow-path allocation",virtual_channel,input));
						}
					}
					let state = self.buffers[input].state(virtual_channel);
					let mut output = self.vc_rr_offset[input][virtual_channel];
					for _output_index in 0..self.num_outputs
					{
						//In active state, we only care about our committed output port.
						if let VcState::Active{output_port,..} = state
						{
							output = output_port;
						}
						let expanded_output = output*self.output_speedup + input%self.output_speedup;
						if self.switch_hold_in[expanded_input].is_none() && self.switch_hold_out[expanded_output].is_none()
						{
							if let Some(priority) = self.eligible_priority(input,virtual_channel,output)
							{
								//A previous round may have requested this same pair; the
								//allocator keeps the one with the greatest priority.
								self.sw_allocator.add_request(Request::new(expanded_input,expanded_output,virtual_channel,priority,self.buffers[input].priority(virtual_channel)));
							}
						}
						if let VcState::Active{..} = state
						{
							break;
						}
						output = (output+1)%self.num_outputs;
					}
				}
			}
			virtual_channel += self.input_speedup;
			if virtual_channel >= self.virtual_channels
			{
				virtual_channel = s;
			}
		}
	}
	///The fast path of the request building: at most one channel of the input may claim its
	///crossbar slot without full arbitration. The claim yields to any slow-path request already
	///standing on the slot, and to standing switch holds.
	fn build_fast_path_requests(&mut self, cycle:Time, input:usize, fast_path_vcs:&mut Vec<Option<usize>>, mutable:&mut CycleMut)
	{
		for virtual_channel in 0..self.virtual_channels
		{
			if !self.use_fast_path[input][virtual_channel]
			{
				continue;
			}
			if self.buffers[input].is_empty(virtual_channel)
			{
				continue;
			}
			if let Some(front) = self.buffers[input].front_flit(virtual_channel)
			{
				if front.watch
				{
					watch_note(mutable,cycle,front,&format!("channel {} at input {} seen in the fast path",virtual_channel,input));
				}
			}
			if !self.is_ready(cycle,input,virtual_channel)
			{
				continue;
			}
			if let Some(previous) = fast_path_vcs[input]
			{
				panic!("Two fast-path channels eligible at input {} of router {}: {} and {}",input,self.router_index,previous,virtual_channel);
			}
			fast_path_vcs[input] = Some(virtual_channel);
			let state = self.buffers[input].state(virtual_channel);
			let expanded_input = input*self.input_speedup + virtual_channel%self.input_speedup;
			for output_index in 0..self.num_outputs
			{
				//If we are done with the virtual channel allocation, we already know our output.
				let output = if let VcState::Active{output_port,..} = state { output_port } else { output_index };
				let expanded_output = output*self.output_speedup + input%self.output_speedup;
				let slot_taken =
					self.sw_allocator.pending_request(expanded_input,expanded_output).is_some()
					|| self.switch_hold_in[expanded_input].is_some()
					|| self.switch_hold_out[expanded_output].is_some();
				if slot_taken
				{
					//A slow-path occupant keeps the slot; an active channel has nowhere else to go.
					if let VcState::Active{..} = state
					{
						break;
					}
					else
					{
						continue;
					}
				}
				if let Some(priority) = self.eligible_priority(input,virtual_channel,output)
				{
					self.sw_allocator.add_request(Request::new(expanded_input,expanded_output,virtual_channel,priority,self.buffers[input].priority(virtual_channel)));
				}
				if let VcState::Active{..} = state
				{
					break;
				}
			}
		}
	}
	///Process the grants of one input port: honor switch holds, finish pending virtual channel
	///allocations, move the winning flits into the crossbar pipeline, and write at most one
	///credit into the credit pipeline.
	fn resolve_input(&mut self, cycle:Time, input:usize, fast_path_vcs:&[Option<usize>], mutable:&mut CycleMut)
	{
		let mut credit : Option<Credit> = None;
		for s in 0..self.input_speedup
		{
			let expanded_input = input*self.input_speedup + s;
			let fast_vc = fast_path_vcs[input];
			//A standing hold takes precedence over the allocator, unless its channel has run dry
			//this cycle, in which case the slot stays unused.
			let resolved : Option<(usize,usize)> = if let Some((held_output,held_vc)) = self.switch_hold_in[expanded_input]
			{
				if self.buffers[input].is_empty(held_vc)
				{
					None
				}
				else
				{
					Some((held_output,held_vc))
				}
			}
			else
			{
				match self.sw_allocator.granted_resource(expanded_input)
				{
					Some(expanded_output) =>
					{
						let virtual_channel = self.sw_allocator.granted_label(expanded_input,expanded_output).expect("a granted pair must keep its request");
						Some((expanded_output,virtual_channel))
					},
					None => None,
				}
			};
			match resolved
			{
				Some((expanded_output,virtual_channel)) =>
				{
					let output = expanded_output/self.output_speedup;
					if Some(virtual_channel) == fast_vc
					{
						if let Some(front) = self.buffers[input].front_flit(virtual_channel)
						{
							if front.watch
							{
								watch_note(mutable,cycle,front,&format!("fast-path allocation successful for channel {} at input {}",virtual_channel,input));
							}
						}
					}
					else if let Some(fast_vc) = fast_vc
					{
						//The slot went to someone else; the fast claim is stale.
						assert!( self.use_fast_path[input][fast_vc] );
						self.use_fast_path[input][fast_vc] = false;
					}
					if let VcState::VcAlloc = self.buffers[input].state(virtual_channel)
					{
						self.finalize_vc_allocation(cycle,input,virtual_channel,output,mutable);
					}
					if let VcState::Active{output_port,output_vc} = self.buffers[input].state(virtual_channel)
					{
						if self.hold_switch_for_packet
						{
							self.switch_hold_in[expanded_input] = Some((expanded_output,virtual_channel));
							self.switch_hold_out[expanded_output] = Some(expanded_input);
						}
						assert_eq!( output_port, output, "the committed output of channel {} at input {} disagrees with its grant",virtual_channel,input );
						assert!( !self.next_buffers[output].is_full_for(output_vc), "transferring into the full channel {} of output {}",output_vc,output );
						let mut flit = self.buffers[input].remove_front_flit(virtual_channel).expect("no flit in the granted channel");
						flit.hops += 1;
						assert_eq!( flit.virtual_channel, virtual_channel, "the front flit does not belong to its channel" );
						//Send the credit for the freed slot back and relabel the flit for its next hop.
						let credit = credit.get_or_insert_with(Credit::default);
						credit.virtual_channels.push(virtual_channel);
						credit.destination_router = flit.from_router;
						flit.virtual_channel = output_vc;
						self.next_buffers[output].record_send(&flit);
						if flit.watch
						{
							watch_note(mutable,cycle,&flit,&format!("forwarding through the crossbar: input {} to output {} (expanded {} to {})",input,output,expanded_input,expanded_output));
						}
						let is_tail = flit.tail;
						self.crossbar_pipeline.write(flit,expanded_output);
						self.statistics_crossed_flits[output] += 1;
						if is_tail
						{
							self.buffers[input].set_state(virtual_channel,VcState::Idle,cycle);
							if !self.buffers[input].is_empty(virtual_channel)
							{
								self.pending_vcs.push_back((input,virtual_channel));
							}
							self.switch_hold_in[expanded_input] = None;
							self.switch_hold_out[expanded_output] = None;
						}
						if !self.use_fast_path[input][virtual_channel]
						{
							//Rotate the slow-path scan past the served channel.
							let next_offset = virtual_channel + self.input_speedup;
							self.sw_rr_offset[expanded_input] = if next_offset < self.virtual_channels { next_offset } else { s };
						}
						if self.buffers[input].is_empty(virtual_channel) && !self.use_fast_path[input][virtual_channel]
						{
							//An emptied channel is eagerly given the fast path for its next packet.
							self.use_fast_path[input][virtual_channel] = true;
						}
					}
				},
				None =>
				{
					if let Some(fast_vc) = fast_vc
					{
						if fast_vc%self.input_speedup == s
						{
							//The fast claim did not produce a transfer; it must re-arbitrate fully.
							assert!( self.use_fast_path[input][fast_vc] );
							self.use_fast_path[input][fast_vc] = false;
							if let Some(front) = self.buffers[input].front_flit(fast_vc)
							{
								if front.watch
								{
									watch_note(mutable,cycle,front,&format!("disabling fast-path allocation for channel {} at input {}",fast_vc,input));
								}
							}
						}
					}
				},
			}
		}
		if let Some(credit) = credit
		{
			self.statistics_emitted_credits[input] += 1;
			self.credit_pipeline.write(credit,input);
		}
	}
	///Complete the virtual channel allocation of a channel granted while in `VcAlloc`: commit to
	///the best egress candidate at the granted output, reserve it downstream, and rotate the
	///output scan offset. It is a defect to reach this point with no candidate available, since
	///the request would not have been granted otherwise.
	fn finalize_vc_allocation(&mut self, cycle:Time, input:usize, virtual_channel:usize, output:usize, mutable:&mut CycleMut)
	{
		let mut selected : Option<(usize,i32)> = None;
		{
			let route = self.buffers[input].route_set(virtual_channel);
			let dest = &self.next_buffers[output];
			for index in 0..route.candidate_count(output)
			{
				let candidate = route.candidate(output,index);
				if !dest.is_available_for(candidate.virtual_channel)
				{
					continue;
				}
				if dest.is_full_for(candidate.virtual_channel)
				{
					continue;
				}
				//Strictly greater: the first candidate wins priority ties.
				if selected.map_or(true,|(_,priority)|candidate.priority>priority)
				{
					selected = Some((candidate.virtual_channel,candidate.priority));
				}
			}
		}
		let (selected_vc,_selected_priority) = selected.unwrap_or_else(||panic!("None of the candidates of channel {} at input {} of router {} were suitable and available at output {}",virtual_channel,input,self.router_index,output));
		self.buffers[input].set_state(virtual_channel,VcState::Active{output_port:output,output_vc:selected_vc},cycle);
		self.next_buffers[output].reserve(selected_vc);
		self.vc_rr_offset[input][virtual_channel] = (output+1)%self.num_outputs;
		if let Some(front) = self.buffers[input].front_flit(virtual_channel)
		{
			if front.watch
			{
				watch_note(mutable,cycle,front,&format!("channel {} at output {} granted to channel {} at input {}",selected_vc,output,virtual_channel,input));
			}
		}
	}
}

///Annotate an event of a watched flit, when there is a sink to annotate to.
fn watch_note(mutable:&mut CycleMut, cycle:Time, flit:&Flit, note:&str)
{
	if flit.watch
	{
		if let Some(sink) = mutable.watch.as_mut()
		{
			sink.flit_note(cycle,flit,note);
		}
	}
}

impl Quantifiable for InputQueued
{
	fn total_memory(&self) -> usize
	{
		size_of::<InputQueued>()
		+ self.buffers.iter().map(|buffer|buffer.total_memory()).sum::<usize>()
		+ self.next_buffers.iter().map(|tracker|tracker.total_memory()).sum::<usize>()
		+ self.crossbar_pipeline.total_memory()
		+ self.credit_pipeline.total_memory()
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
