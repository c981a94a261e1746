/*!
Tests of the allocation policies of the switch: switch holding, the interplay between the fast
and the slow paths, round-robin fairness, speedups and priorities.
 */

mod common;

use common::*;
use cruce_lib::*;

/// With `hold_switch_for_packet` a whole packet keeps its crossbar slot: a competitor for the
/// same output cannot break in until the tail goes by, and then it gets the output.
#[test]
fn held_switch_serves_the_whole_packet_first()
{
    let router_cv = create_input_queued_router(2.0, 8.0, create_islip_allocator(1.0), vec![
        ("hold_switch_for_packet".to_string(), ConfigurationValue::True),
    ]);
    let mut router = build_router(&router_cv, 2, 1);
    let mut cycle_mut = new_cycle_mut(1);

    // A packet of three flits at input 0 and a single-flit packet at input 1, both for output 0.
    for flit in packet_flits(10, 0, 0, 0, 3, RouteSet::single(1, 0, 0, 0))
    {
        router.insert(0, flit, 0);
    }
    router.insert(0, single_flit_packet(20, 0, 0, RouteSet::single(1, 0, 1, 0)), 1);

    // The packet of input 0 wins the first arbitration and then holds the switch.
    for cycle in 1..=3
    {
        let output = router.process(cycle, &mut cycle_mut);
        assert_eq!(crossed_ids(&output), vec![(0, 10 + (cycle as usize - 1))], "the held input retries the same output every cycle");
    }
    // The tail released the hold; now the competitor crosses.
    let output = router.process(4, &mut cycle_mut);
    assert_eq!(crossed_ids(&output), vec![(0, 20)]);
    assert_eq!(output.crossed_flits[0].1.virtual_channel, 1, "the competitor got its own downstream channel");
    let output = router.process(5, &mut cycle_mut);
    assert!(output.crossed_flits.is_empty());
}

/// When a fast-path claim targets a crossbar slot already requested by the slow path, only the
/// slow-path request reaches the allocator, the slow channel transfers, and the displaced fast
/// claim must re-arbitrate fully the next cycle.
#[test]
fn fast_path_yields_to_the_slow_path()
{
    // buffer_size 1 makes the downstream fill after every transfer, which lets the test park a
    // channel out of the fast path before bringing the contender in.
    let router_cv = create_input_queued_router(2.0, 1.0, create_islip_allocator(1.0), vec![]);
    let mut router = build_router(&router_cv, 1, 1);
    let mut cycle_mut = new_cycle_mut(1);

    router.insert(0, single_flit_packet(0, 0, 0, RouteSet::single(1, 0, 0, 0)), 0);
    let output = router.process(1, &mut cycle_mut);
    assert_eq!(crossed_ids(&output), vec![(0, 0)]);

    // The downstream buffer is full: the fast claim of channel 0 for its next packet fails and
    // channel 0 leaves the fast path.
    router.insert(1, single_flit_packet(1, 0, 0, RouteSet::single(1, 0, 0, 0)), 0);
    let output = router.process(2, &mut cycle_mut);
    assert!(output.crossed_flits.is_empty(), "no space downstream, nothing crosses");

    // A contender arrives at channel 1, still fast-path eligible. The downstream space returns.
    router.insert(2, single_flit_packet(2, 1, 0, RouteSet::single(1, 0, 0, 0)), 0);
    router.acknowledge(2, 0, credit_for(0));

    // Channel 0 requests through the slow path; the fast claim of channel 1 finds the slot
    // taken and yields. The slow channel crosses and the claim of channel 1 is withdrawn.
    let output = router.process(3, &mut cycle_mut);
    assert_eq!(crossed_ids(&output), vec![(0, 1)], "the slow-path request wins the slot");
    router.acknowledge(3, 0, credit_for(0));

    // Channel 1 now goes through full arbitration and crosses.
    let output = router.process(4, &mut cycle_mut);
    assert_eq!(crossed_ids(&output), vec![(0, 2)]);
}

/// Two backlogged channels of the same input are served alternately: the round-robin offset of
/// the expanded input moves past each served channel, so no channel starves.
#[test]
fn backlogged_channels_alternate()
{
    let router_cv = create_input_queued_router(2.0, 1.0, create_islip_allocator(1.0), vec![]);
    let mut router = build_router(&router_cv, 1, 1);
    let mut cycle_mut = new_cycle_mut(1);

    let route = || RouteSet::single(1, 0, 0, 0);
    router.insert(0, single_flit_packet(0, 0, 0, route()), 0);
    let output = router.process(1, &mut cycle_mut);
    assert_eq!(crossed_ids(&output), vec![(0, 0)]);

    // Backlog three more packets on channel 0 and three on channel 1. The full downstream stalls
    // each channel once, moving both out of the fast path.
    for flit in (1..=3).map(|id| single_flit_packet(id, 0, 0, route()))
    {
        router.insert(1, flit, 0);
    }
    let output = router.process(2, &mut cycle_mut);
    assert!(output.crossed_flits.is_empty());
    for flit in (11..=13).map(|id| single_flit_packet(id, 1, 0, route()))
    {
        router.insert(2, flit, 0);
    }
    let output = router.process(3, &mut cycle_mut);
    assert!(output.crossed_flits.is_empty());

    // From here on a credit returns every cycle and the channels compete through the slow path.
    let mut order = vec![];
    for cycle in 4..=9
    {
        router.acknowledge(cycle - 1, 0, credit_for(0));
        let output = router.process(cycle, &mut cycle_mut);
        for &(_, id) in crossed_ids(&output).iter()
        {
            order.push(id);
        }
    }
    assert_eq!(order, vec![1, 11, 2, 12, 3, 13], "the served channel rotates every grant");
}

/// With input speedup 2 the two channels of an input feed different expanded inputs and can
/// cross in the same cycle, and their freed slots are batched into a single credit.
#[test]
fn input_speedup_batches_the_credits()
{
    let router_cv = create_input_queued_router(2.0, 1.0, create_islip_allocator(1.0), vec![
        ("input_speedup".to_string(), ConfigurationValue::Number(2.0)),
    ]);
    let mut router = build_router(&router_cv, 1, 2);
    let mut cycle_mut = new_cycle_mut(1);

    router.insert(0, single_flit_packet(0, 0, 0, RouteSet::single(2, 0, 0, 0)), 0);
    let output = router.process(1, &mut cycle_mut);
    assert_eq!(crossed_ids(&output), vec![(0, 0)]);

    // Stall channel 0 once so it goes through the slow path afterwards.
    router.insert(1, single_flit_packet(1, 0, 0, RouteSet::single(2, 0, 0, 0)), 0);
    let output = router.process(2, &mut cycle_mut);
    assert!(output.crossed_flits.is_empty());

    // A packet on channel 1 towards the other output; space returns at output 0.
    router.insert(2, single_flit_packet(2, 1, 0, RouteSet::single(2, 1, 0, 0)), 0);
    router.acknowledge(2, 0, credit_for(0));

    // Both expanded inputs of input 0 win in the same cycle.
    let output = router.process(3, &mut cycle_mut);
    assert_eq!(crossed_ids(&output), vec![(0, 1), (1, 2)], "both channels cross in the same cycle");
    assert_eq!(output.returned_credits.len(), 1, "one credit per input and cycle, batching both channels");
    assert_eq!(output.returned_credits[0].1.virtual_channels, vec![0, 1]);
}

/// With a priority-aware allocator the packet with the greatest priority wins the contended
/// output; the loser crosses on the following cycle.
#[test]
fn greatest_packet_priority_crosses_first()
{
    let router_cv = create_input_queued_router(1.0, 8.0, create_random_priority_allocator(), vec![]);
    let mut router = build_router(&router_cv, 2, 1);
    let mut cycle_mut = new_cycle_mut(1);

    router.insert(0, single_flit_packet(0, 0, 1, RouteSet::single(1, 0, 0, 0)), 0);
    router.insert(0, single_flit_packet(1, 0, 9, RouteSet::single(1, 0, 0, 0)), 1);

    let output = router.process(1, &mut cycle_mut);
    assert_eq!(crossed_ids(&output), vec![(0, 1)], "the priority 9 packet wins the contention");
    assert_eq!(output.crossed_flits[0].1.priority, 9);
    let output = router.process(2, &mut cycle_mut);
    assert_eq!(crossed_ids(&output), vec![(0, 0)], "the displaced packet crosses next");
}
