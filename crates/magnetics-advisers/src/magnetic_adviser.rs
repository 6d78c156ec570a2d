use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use magnetics_core::coil::WindingFunctionalDescription;
use magnetics_core::inductance::magnetizing::magnetizing_inductance;
use magnetics_core::inductance::matrix::inductance_matrix;
use magnetics_core::losses::winding_losses;
use magnetics_core::mas::{Inputs, Mas, Magnetic, MagneticOutputs};
use magnetics_core::registry::Registry;
use magnetics_core::resistance::resistance_matrix;
use magnetics_core::settings::Settings;

use crate::core_adviser::{self, ScoredCandidate};
use crate::coil_adviser;
use crate::filter::{self, NamedFilter, PipelineResult};

struct HeapEntry {
    score: f64,
    mas: Mas,
    pipeline: PipelineResult,
}

impl PartialEq for HeapEntry {
    fn eq(&self, other: &Self) -> bool {
        self.score == other.score
    }
}
impl Eq for HeapEntry {}
impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        // Reverse so a BinaryHeap (max-heap) pops the *worst* score
        // first, letting us cheaply evict it once the heap overflows
        // `top_k`.
        other.score.partial_cmp(&self.score)
    }
}
impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.partial_cmp(other).unwrap_or(Ordering::Equal)
    }
}

pub struct SearchOutcome {
    pub candidates: Vec<(Mas, PipelineResult)>,
}

fn evaluate_candidate(
    functional: &[WindingFunctionalDescription],
    core_candidate: &ScoredCandidate<magnetics_core::core_data::Core>,
    inputs: &Inputs,
    settings: &Settings,
    registry: &Registry,
    filters: &[NamedFilter],
) -> Vec<HeapEntry> {
    let coils = coil_adviser::synthesize(
        &core_candidate.candidate,
        functional,
        registry,
        settings,
        inputs,
    );

    let mut entries = Vec::new();
    for coil in coils {
        let Some(op) = inputs.operating_points.first() else {
            continue;
        };
        let Ok(mag_output) =
            magnetizing_inductance(&core_candidate.candidate, functional[0].number_turns, settings)
        else {
            continue;
        };
        let mean_turn_length = coil
            .turns
            .first()
            .map(|t| t.length)
            .unwrap_or(core_candidate.candidate.winding_window.width);
        let Ok(l_matrix) = inductance_matrix(
            &coil,
            op.excitations.first().map(|e| e.current.frequency).unwrap_or(100_000.0),
            mag_output.lm0,
            functional[0].number_turns,
            mean_turn_length,
            core_candidate.candidate.winding_window.width,
        ) else {
            continue;
        };

        let wires = coil
            .functional
            .iter()
            .map(|_| magnetics_core::wire::Wire::round(0.0005).unwrap())
            .collect::<Vec<_>>();

        let Ok(losses) = winding_losses(&coil, &wires, settings, op) else {
            continue;
        };
        let r_matrix = resistance_matrix(
            &coil,
            &wires,
            settings,
            op.excitations.first().map(|e| e.current.frequency).unwrap_or(100_000.0),
            op.ambient_temperature,
        )
        .ok();

        let mut winding_losses_map = HashMap::new();
        for (name, breakdown) in &losses.per_winding {
            winding_losses_map.insert(name.clone(), breakdown.dc + breakdown.skin + breakdown.proximity);
        }

        let outputs = MagneticOutputs {
            inductance_matrix: vec![l_matrix],
            resistance_matrix: r_matrix.into_iter().collect(),
            coupling_coefficients: HashMap::new(),
            winding_losses: winding_losses_map,
            core_losses: None,
            numerical_issues: losses.numerical_issues,
        };

        let mas = Mas {
            inputs: inputs.clone(),
            magnetic: Magnetic {
                name: core_candidate.candidate.material.name.clone(),
                core: core_candidate.candidate.clone(),
                coil,
                wires,
            },
            outputs: Some(outputs),
        };

        let pipeline = filter::evaluate(&mas, inputs, filters);
        let score = pipeline.aggregate.unwrap_or(f64::INFINITY);
        entries.push(HeapEntry {
            score,
            mas,
            pipeline,
        });
    }
    entries
}

/// Orchestrates core selection, coil synthesis, the physics pipeline,
/// and the filter pipeline, keeping only the best `top_k` candidates in
/// memory via a bounded max-heap over the *worst* score seen so far.
pub fn search(
    functional: &[WindingFunctionalDescription],
    inputs: &Inputs,
    registry: &Registry,
    settings: &Settings,
    filters: &[NamedFilter],
    top_k: usize,
    cancel: &dyn Fn() -> bool,
) -> SearchOutcome {
    let core_candidates = core_adviser::rank(inputs, registry, settings, 32);
    let mut heap: BinaryHeap<HeapEntry> = BinaryHeap::new();

    for core_candidate in &core_candidates {
        if cancel() {
            break;
        }
        let entries = evaluate_candidate(functional, core_candidate, inputs, settings, registry, filters);
        for entry in entries {
            heap.push(entry);
            if heap.len() > top_k {
                heap.pop();
            }
        }
    }

    let mut candidates: Vec<(Mas, PipelineResult)> = heap
        .into_sorted_vec()
        .into_iter()
        .map(|e| (e.mas, e.pipeline))
        .collect();
    candidates.reverse();

    SearchOutcome { candidates }
}
