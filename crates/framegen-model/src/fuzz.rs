//! Fuzzing expansion
//!
//! Generates test-vector frames by substituting the alternate values of a
//! frame's active fuzzing labels into copies of the frame.

use tracing::debug;

use crate::frame::Frame;

/// How alternate label values are combined into generated frames
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FuzzMode {
    /// One label at a time, one frame per alternate value
    #[default]
    Successive,
    /// The i-th value of every label in the i-th frame
    Concurrent,
    /// Every combination of alternate values
    Exhaustive,
}

impl FuzzMode {
    /// Returns a human-readable name for the mode
    pub fn name(&self) -> &'static str {
        match self {
            FuzzMode::Successive => "Successive",
            FuzzMode::Concurrent => "Concurrent",
            FuzzMode::Exhaustive => "Exhaustive",
        }
    }

    /// Parse a mode from its lowercase name
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "successive" => Some(FuzzMode::Successive),
            "concurrent" => Some(FuzzMode::Concurrent),
            "exhaustive" => Some(FuzzMode::Exhaustive),
            _ => None,
        }
    }
}

/// (label index, fuzz value index) pairs applied to one generated frame
type Assignment = Vec<(usize, usize)>;

impl Frame {
    /// Expand the active fuzzing labels into generated frames
    ///
    /// Generated frames are marked `fuzz_created`, as is every label whose
    /// value was substituted. Fuzzing is switched off on the copies so they
    /// do not expand again. Returns an empty vector when no label is active.
    pub fn fuzz(&self, mode: FuzzMode) -> Vec<Frame> {
        let active: Vec<usize> = self.active_fuzzing_labels().map(|(i, _)| i).collect();
        if active.is_empty() {
            return Vec::new();
        }

        let value_count = |label: usize| self.labels[label].fuzz_values.len();

        let assignments: Vec<Assignment> = match mode {
            FuzzMode::Successive => active
                .iter()
                .flat_map(|&label| (0..value_count(label)).map(move |value| vec![(label, value)]))
                .collect(),
            FuzzMode::Concurrent => {
                let rounds = active.iter().map(|&l| value_count(l)).max().unwrap_or(0);
                (0..rounds)
                    .map(|value| {
                        active
                            .iter()
                            .filter(|&&label| value < value_count(label))
                            .map(|&label| (label, value))
                            .collect()
                    })
                    .collect()
            }
            FuzzMode::Exhaustive => {
                let mut combos: Vec<Assignment> = vec![Vec::new()];
                for &label in &active {
                    combos = combos
                        .into_iter()
                        .flat_map(|combo| {
                            (0..value_count(label)).map(move |value| {
                                let mut next = combo.clone();
                                next.push((label, value));
                                next
                            })
                        })
                        .collect();
                }
                combos
            }
        };

        debug!(
            "{} fuzzing over {} labels produced {} frames",
            mode.name(),
            active.len(),
            assignments.len()
        );

        assignments
            .iter()
            .map(|assignment| self.fuzzed_copy(&active, assignment))
            .collect()
    }

    fn fuzzed_copy(&self, active: &[usize], assignment: &[(usize, usize)]) -> Frame {
        let mut frame = self.clone();
        frame.fuzz_created = true;

        for &(label_index, value_index) in assignment {
            let value = &self.labels[label_index].fuzz_values[value_index];
            let label = &mut frame.labels[label_index];
            let end = label.end.min(frame.bits.len());
            for (offset, bit) in (label.start..end).enumerate() {
                frame.bits[bit] = value.get(offset).copied().unwrap_or(false);
            }
            label.fuzz_created = true;
        }

        for &label_index in active {
            let label = &mut frame.labels[label_index];
            label.fuzz_enabled = false;
            label.fuzz_values.clear();
        }

        frame
    }
}
