//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use std::collections::BTreeMap;

use otd_model::{AssignmentTarget, Decimal64, LogicalChannel};

use crate::assembler::AssemblyOptions;
use crate::debug::Debug;
use crate::error::{CapacityViolation, Error, Reference};
use crate::graph::{ConfigurationGraph, Link, NodeKey};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Visit {
    InProgress,
    Done,
}

// ===== global functions =====

// Resolves all cross-references of the graph, returning the resulting links
// in traversal order of their source nodes.
pub(crate) fn resolve(
    graph: &ConfigurationGraph,
    options: &AssemblyOptions,
) -> Result<Vec<Link>, Error> {
    let mut links = vec![];

    for channel in graph.logical_channels() {
        if options.strict_ingress
            && let Some(ingress) = &channel.ingress
        {
            if graph.interface(&ingress.transceiver).is_none() {
                return Err(Error::DanglingReference(Reference::Transceiver(
                    channel.index,
                    ingress.transceiver.clone(),
                )));
            }
            links.push(Link::new(
                NodeKey::LogicalChannel(channel.index),
                NodeKey::Interface(ingress.transceiver.clone()),
            ));
        }

        for assignment in &channel.assignments {
            let target = match &assignment.target {
                AssignmentTarget::LogicalChannel(index) => graph
                    .logical_channel(*index)
                    .map(|_| NodeKey::LogicalChannel(*index)),
                AssignmentTarget::OpticalChannel(name) => graph
                    .optical_channel(name)
                    .map(|_| NodeKey::OpticalChannel(name.clone())),
            };
            let Some(target) = target else {
                return Err(Error::DanglingReference(Reference::Assignment(
                    channel.index,
                    assignment.index,
                    assignment.target.clone(),
                )));
            };

            if let Some(rate_class) = channel.rate_class {
                let capacity = rate_class.capacity();
                if assignment.allocation > capacity {
                    return Err(Error::CapacityExceeded(CapacityViolation {
                        channel: channel.index,
                        assignment: Some(assignment.index),
                        rate_class,
                        allocation: assignment.allocation,
                        capacity,
                    }));
                }
            }

            links.push(Link::new(
                NodeKey::Assignment(channel.index, assignment.index),
                target,
            ));
        }

        if options.aggregate_capacity {
            check_aggregate(channel)?;
        }
    }

    for och in graph.optical_channels() {
        if graph.interface(&och.line_port).is_none() {
            return Err(Error::DanglingReference(Reference::LinePort(
                och.name.clone(),
                och.line_port.clone(),
            )));
        }
        links.push(Link::new(
            NodeKey::OpticalChannel(och.name.clone()),
            NodeKey::Interface(och.line_port.clone()),
        ));
    }

    check_cycles(graph)?;

    for link in &links {
        Debug::ReferenceResolved(link).log();
    }

    Ok(links)
}

// Checks that the sum of all allocations out of the channel fits its
// capacity.
fn check_aggregate(channel: &LogicalChannel) -> Result<(), Error> {
    let Some(rate_class) = channel.rate_class else {
        return Ok(());
    };
    let capacity = rate_class.capacity();

    let mut allocated = Decimal64::ZERO;
    for assignment in &channel.assignments {
        // A sum that can't be represented exceeds any capacity.
        allocated = allocated
            .checked_add(assignment.allocation)
            .filter(|total| *total <= capacity)
            .ok_or_else(|| {
                Error::AggregateCapacityExceeded(CapacityViolation {
                    channel: channel.index,
                    assignment: None,
                    rate_class,
                    allocation: allocated
                        .checked_add(assignment.allocation)
                        .unwrap_or(allocated),
                    capacity,
                })
            })?;
    }

    Ok(())
}

// Rejects logical channel assignment chains that loop back on themselves.
//
// Depth-first walk over the assignment targets with an explicit stack, so
// chain length isn't bounded by the thread stack.
fn check_cycles(graph: &ConfigurationGraph) -> Result<(), Error> {
    let mut visits = BTreeMap::new();

    for channel in graph.logical_channels() {
        if visits.contains_key(&channel.index) {
            continue;
        }

        // Channels on the current path, each with its next assignment.
        let mut path = vec![(channel.index, 0)];
        visits.insert(channel.index, Visit::InProgress);
        while let Some((index, next)) = path.last_mut() {
            let index = *index;
            let assignment = graph
                .logical_channel(index)
                .and_then(|channel| channel.assignments.get(*next));
            *next += 1;

            let Some(assignment) = assignment else {
                visits.insert(index, Visit::Done);
                path.pop();
                continue;
            };
            let AssignmentTarget::LogicalChannel(target) = &assignment.target
            else {
                continue;
            };
            match visits.get(target) {
                Some(Visit::Done) => (),
                Some(Visit::InProgress) => {
                    // Report the loop starting and ending at the revisited
                    // channel.
                    let start = path
                        .iter()
                        .position(|(hop, _)| hop == target)
                        .unwrap_or(0);
                    let mut cycle = path[start..]
                        .iter()
                        .map(|(hop, _)| *hop)
                        .collect::<Vec<_>>();
                    cycle.push(*target);
                    return Err(Error::AssignmentCycle(cycle));
                }
                None => {
                    visits.insert(*target, Visit::InProgress);
                    path.push((*target, 0));
                }
            }
        }
    }

    Ok(())
}
