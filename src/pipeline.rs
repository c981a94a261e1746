
use std::mem::size_of;

use crate::quantify::Quantifiable;

/// An amount of cycles.
pub type Time = u64;

/**
A fixed-delay conduit with one slot per port, such as the crossbar pipeline towards the output
stage or the credit pipeline towards the upstream routers.

A value written at some cycle becomes readable by [advance](Pipeline::advance) exactly `delay`
cycles later; with `delay` 0 it is returned by the `advance` closing the same cycle. Each slot
admits at most one write per cycle, reflecting that a crossbar output can receive at most one flit
and an input can return at most one credit per cycle. Writing a slot twice in the same cycle is a
programming defect of the allocation stage and panics.

The storage is a circle of rows, one per in-flight cycle, in the fashion of an event queue.
**/
pub struct Pipeline<T>
{
	///`stages[k][slot]`, with `k` circulating over the `delay+1` rows in flight.
	stages: Vec<Vec<Option<T>>>,
	///Row to be extracted by the next call to `advance`.
	current: usize,
	delay: usize,
}

impl<T> Pipeline<T>
{
	pub fn new(delay:Time, width:usize) -> Pipeline<T>
	{
		let delay = delay as usize;
		Pipeline{
			stages: (0..delay+1).map(|_| (0..width).map(|_|None).collect() ).collect(),
			current: 0,
			delay,
		}
	}
	///The number of slots in each row.
	pub fn width(&self) -> usize
	{
		self.stages[0].len()
	}
	pub fn delay(&self) -> Time
	{
		self.delay as Time
	}
	///Deposit a value in the slot, to be seen `delay` cycles from now.
	pub fn write(&mut self, value:T, slot:usize)
	{
		let row = (self.current+self.delay) % self.stages.len();
		let entry = &mut self.stages[row][slot];
		if entry.is_some()
		{
			panic!("Pipeline slot {} written twice in the same cycle",slot);
		}
		*entry = Some(value);
	}
	///Close the cycle: return the values that have completed their delay, with the slot they
	///were written to, and rotate the circle.
	pub fn advance(&mut self) -> Vec<(usize,T)>
	{
		let width = self.width();
		let row = std::mem::replace(&mut self.stages[self.current], (0..width).map(|_|None).collect() );
		self.current = (self.current+1) % self.stages.len();
		row.into_iter().enumerate().filter_map(|(slot,value)| value.map(|value|(slot,value)) ).collect()
	}
}

impl<T:Quantifiable> Quantifiable for Pipeline<T>
{
	fn total_memory(&self) -> usize
	{
		size_of::<Pipeline<T>>() + self.stages.total_memory()
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

#[cfg(test)]
mod tests
{
	use super::*;
	#[test]
	fn zero_delay_is_visible_on_the_same_cycle()
	{
		let mut pipeline : Pipeline<u32> = Pipeline::new(0,3);
		pipeline.write(42,1);
		assert_eq!( pipeline.advance() , vec![ (1,42) ] );
		assert!( pipeline.advance().is_empty() );
	}
	#[test]
	fn delayed_values_take_their_time()
	{
		let mut pipeline : Pipeline<u32> = Pipeline::new(2,2);
		pipeline.write(7,0);
		assert!( pipeline.advance().is_empty() );
		pipeline.write(9,1);
		assert!( pipeline.advance().is_empty() );
		assert_eq!( pipeline.advance() , vec![ (0,7) ] );
		assert_eq!( pipeline.advance() , vec![ (1,9) ] );
		assert!( pipeline.advance().is_empty() );
	}
	#[test]
	#[should_panic]
	fn double_write_panics()
	{
		let mut pipeline : Pipeline<u32> = Pipeline::new(1,2);
		pipeline.write(1,0);
		pipeline.write(2,0);
	}
}
