#![allow(dead_code)]

use ::rand::rngs::StdRng;
use ::rand::SeedableRng;

use cruce_lib::*;
use cruce_lib::router::{new_router, Router, RouterBuilderArgument};

pub fn create_islip_allocator(num_iterations: f64) -> ConfigurationValue
{
    ConfigurationValue::Object("Islip".to_string(), vec![
        ("num_iterations".to_string(), ConfigurationValue::Number(num_iterations)),
    ])
}

pub fn create_random_priority_allocator() -> ConfigurationValue
{
    ConfigurationValue::Object("RandomWithPriority".to_string(), vec![])
}

pub fn create_input_queued_router(virtual_channels: f64, buffer_size: f64, allocator: ConfigurationValue, extra: Vec<(String, ConfigurationValue)>) -> ConfigurationValue
{
    let mut pairs = vec![
        ("virtual_channels".to_string(), ConfigurationValue::Number(virtual_channels)),
        ("buffer_size".to_string(), ConfigurationValue::Number(buffer_size)),
        ("allocator".to_string(), allocator),
    ];
    pairs.extend(extra);
    ConfigurationValue::Object("InputQueued".to_string(), pairs)
}

pub fn build_router(cv: &ConfigurationValue, num_inputs: usize, num_outputs: usize) -> Box<dyn Router>
{
    let plugs = Plugs::default();
    let mut rng = StdRng::seed_from_u64(10u64);
    new_router(RouterBuilderArgument {
        router_index: 0,
        cv,
        plugs: &plugs,
        num_inputs,
        num_outputs,
        rng: &mut rng,
    })
}

pub fn new_cycle_mut(seed: u64) -> CycleMut<'static>
{
    CycleMut {
        rng: StdRng::seed_from_u64(seed),
        watch: None,
    }
}

///A whole packet of one flit.
pub fn single_flit_packet(id: usize, virtual_channel: usize, priority: i32, route: RouteSet) -> Flit
{
    Flit {
        id,
        packet_index: id,
        virtual_channel,
        priority,
        head: true,
        tail: true,
        hops: 0,
        from_router: 0,
        destination_router: 1,
        watch: false,
        route: Some(route),
        creation_cycle: 0,
    }
}

///The flits of a packet of the given size, with consecutive identifiers starting at `first_id`.
pub fn packet_flits(first_id: usize, packet_index: usize, virtual_channel: usize, priority: i32, size: usize, route: RouteSet) -> Vec<Flit>
{
    (0..size).map(|index| Flit {
        id: first_id + index,
        packet_index,
        virtual_channel,
        priority,
        head: index == 0,
        tail: index + 1 == size,
        hops: 0,
        from_router: 0,
        destination_router: 1,
        watch: false,
        route: if index == 0 { Some(route.clone()) } else { None },
        creation_cycle: 0,
    }).collect()
}

///A credit freeing one slot of the given virtual channel, as the downstream router would send it.
pub fn credit_for(virtual_channel: usize) -> Credit
{
    Credit {
        virtual_channels: vec![virtual_channel],
        destination_router: 0,
    }
}

///The identifiers of the flits that crossed, with their expanded outputs.
pub fn crossed_ids(output: &CycleOutput) -> Vec<(usize, usize)>
{
    output.crossed_flits.iter().map(|&(slot, ref flit)| (slot, flit.id)).collect()
}
