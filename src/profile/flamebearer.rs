//! Flamebearer payload decoding.
//!
//! The server encodes the call tree level by level. Each level is a flat
//! array of fixed-width node records whose `offset` is relative to the end of
//! the previous node on the same level. This module walks those levels and
//! produces collapsed stacks (`a;b;c weight`) suitable for flamegraph renderers.

use super::schema::FlamegraphProfile;
use crate::utils::error::ProfileError;
use log::debug;
use serde::Deserialize;
use std::collections::HashMap;

/// Tree data of a flamebearer payload
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flamebearer {
    pub names: Vec<String>,
    pub levels: Vec<Vec<u64>>,
    #[serde(default)]
    pub num_ticks: u64,
    #[serde(default)]
    pub max_self: u64,
}

/// Node record layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlamebearerFormat {
    /// `[offset, total, self, name]`
    Single,
    /// `[offset, total, self, offsetRight, totalRight, selfRight, name]`
    Double,
}

impl FlamebearerFormat {
    pub fn parse(name: &str) -> Result<Self, ProfileError> {
        match name {
            "single" => Ok(Self::Single),
            "double" => Ok(Self::Double),
            other => Err(ProfileError::UnsupportedFormat(other.to_string())),
        }
    }

    fn record_width(self) -> usize {
        match self {
            Self::Single => 4,
            Self::Double => 7,
        }
    }

    fn name_index(self) -> usize {
        match self {
            Self::Single => 3,
            Self::Double => 6,
        }
    }
}

/// A collapsed stack: semicolon-joined frames and their self weight
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollapsedStack {
    pub stack: String,
    pub weight: u64,
}

impl CollapsedStack {
    pub fn new(stack: impl Into<String>, weight: u64) -> Self {
        Self {
            stack: stack.into(),
            weight,
        }
    }

    /// Line in the folded format understood by inferno
    pub fn to_line(&self) -> String {
        format!("{} {}", self.stack, self.weight)
    }
}

/// Horizontal extent of an already decoded node
struct Span {
    start: u64,
    end: u64,
    path: String,
}

/// Decode the flamebearer payload of a profile into collapsed stacks
///
/// Stacks are sorted by weight (heaviest first), ties broken by name.
pub fn collapse_profile(profile: &FlamegraphProfile) -> Result<Vec<CollapsedStack>, ProfileError> {
    let format = FlamebearerFormat::parse(profile.metadata.format())?;

    let raw = profile
        .payload
        .get("flamebearer")
        .ok_or_else(|| ProfileError::InvalidPayload("missing flamebearer".to_string()))?;

    let flamebearer = Flamebearer::deserialize(raw)?;
    collapse(&flamebearer, format)
}

/// Decode flamebearer levels into collapsed stacks
pub fn collapse(
    flamebearer: &Flamebearer,
    format: FlamebearerFormat,
) -> Result<Vec<CollapsedStack>, ProfileError> {
    let width = format.record_width();
    let name_index = format.name_index();

    let mut parents: Vec<Span> = Vec::new();
    let mut weights: HashMap<String, u64> = HashMap::new();

    for (depth, level) in flamebearer.levels.iter().enumerate() {
        if level.len() % width != 0 {
            return Err(ProfileError::InvalidPayload(format!(
                "level {} has {} values, not a multiple of {}",
                depth,
                level.len(),
                width
            )));
        }

        let mut current = Vec::with_capacity(level.len() / width);
        let mut x = 0u64;
        // Both levels are ordered by x, so the parent cursor only moves forward
        let mut cursor = 0usize;

        for record in level.chunks_exact(width) {
            let start = x.checked_add(record[0]).ok_or_else(|| overflow(depth))?;
            let total = record[1];
            let self_weight = record[2];
            let end = start.checked_add(total).ok_or_else(|| overflow(depth))?;
            x = end;

            let name = usize::try_from(record[name_index])
                .ok()
                .and_then(|i| flamebearer.names.get(i))
                .ok_or_else(|| {
                    ProfileError::InvalidPayload(format!(
                        "name index {} out of range at level {}",
                        record[name_index], depth
                    ))
                })?;

            let path = if depth == 0 {
                name.clone()
            } else {
                while cursor + 1 < parents.len() && parents[cursor + 1].start <= start {
                    cursor += 1;
                }

                let parent = parents
                    .get(cursor)
                    .filter(|p| p.start <= start && end <= p.end)
                    .ok_or_else(|| {
                        ProfileError::InvalidPayload(format!(
                            "node '{}' at level {} has no parent",
                            name, depth
                        ))
                    })?;
                format!("{};{}", parent.path, name)
            };

            if self_weight > 0 {
                let weight = weights.entry(path.clone()).or_default();
                *weight = weight.saturating_add(self_weight);
            }

            current.push(Span { start, end, path });
        }

        parents = current;
    }

    let mut stacks: Vec<CollapsedStack> = weights
        .into_iter()
        .map(|(stack, weight)| CollapsedStack { stack, weight })
        .collect();
    stacks.sort_by(|a, b| b.weight.cmp(&a.weight).then_with(|| a.stack.cmp(&b.stack)));

    debug!(
        "Decoded {} stacks from {} levels",
        stacks.len(),
        flamebearer.levels.len()
    );

    Ok(stacks)
}

fn overflow(depth: usize) -> ProfileError {
    ProfileError::InvalidPayload(format!("offset overflow at level {}", depth))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> Flamebearer {
        // total(10) -> main(10, self 2) -> { work(5, self 5), io(3, self 3) }
        Flamebearer {
            names: vec![
                "total".to_string(),
                "main".to_string(),
                "work".to_string(),
                "io".to_string(),
            ],
            levels: vec![
                vec![0, 10, 0, 0],
                vec![0, 10, 2, 1],
                vec![0, 5, 5, 2, 0, 3, 3, 3],
            ],
            num_ticks: 10,
            max_self: 5,
        }
    }

    #[test]
    fn test_collapse_single() {
        let stacks = collapse(&tree(), FlamebearerFormat::Single).unwrap();

        assert_eq!(
            stacks,
            vec![
                CollapsedStack::new("total;main;work", 5),
                CollapsedStack::new("total;main;io", 3),
                CollapsedStack::new("total;main", 2),
            ]
        );
    }

    #[test]
    fn test_offsets_are_relative() {
        // Second node on level 2 starts 1 tick after the first one ends
        let fb = Flamebearer {
            names: vec!["total".into(), "a".into(), "b".into()],
            levels: vec![vec![0, 10, 0, 0], vec![0, 4, 4, 1, 1, 5, 5, 2]],
            num_ticks: 10,
            max_self: 5,
        };

        let stacks = collapse(&fb, FlamebearerFormat::Single).unwrap();
        assert_eq!(stacks[0], CollapsedStack::new("total;b", 5));
        assert_eq!(stacks[1], CollapsedStack::new("total;a", 4));
    }

    #[test]
    fn test_collapse_double_uses_left_side() {
        let fb = Flamebearer {
            names: vec!["total".into(), "main".into()],
            levels: vec![vec![0, 8, 0, 0, 9, 0, 0], vec![0, 8, 8, 0, 9, 9, 1]],
            num_ticks: 17,
            max_self: 9,
        };

        let stacks = collapse(&fb, FlamebearerFormat::Double).unwrap();
        assert_eq!(stacks, vec![CollapsedStack::new("total;main", 8)]);
    }

    #[test]
    fn test_name_index_out_of_range() {
        let mut fb = tree();
        fb.levels[1][3] = 42;

        let result = collapse(&fb, FlamebearerFormat::Single);
        assert!(matches!(result, Err(ProfileError::InvalidPayload(_))));
    }

    #[test]
    fn test_ragged_level_rejected() {
        let mut fb = tree();
        fb.levels[2].pop();

        assert!(collapse(&fb, FlamebearerFormat::Single).is_err());
    }

    #[test]
    fn test_huge_totals_rejected() {
        let fb = Flamebearer {
            names: vec!["total".into(), "main".into()],
            levels: vec![vec![0, u64::MAX, 0, 0], vec![1, u64::MAX, 5, 1]],
            num_ticks: u64::MAX,
            max_self: 5,
        };

        let result = collapse(&fb, FlamebearerFormat::Single);
        assert!(matches!(result, Err(ProfileError::InvalidPayload(msg)) if msg.contains("overflow")));
    }

    #[test]
    fn test_orphan_node_rejected() {
        // Child starts past the end of its only parent
        let fb = Flamebearer {
            names: vec!["total".into(), "main".into()],
            levels: vec![vec![0, 4, 0, 0], vec![6, 2, 2, 1]],
            num_ticks: 4,
            max_self: 2,
        };

        assert!(collapse(&fb, FlamebearerFormat::Single).is_err());
    }

    #[test]
    fn test_children_split_across_parents() {
        // total -> {a(4), b(6)}; a -> x(4), b -> y(6)
        let fb = Flamebearer {
            names: vec!["total".into(), "a".into(), "b".into(), "x".into(), "y".into()],
            levels: vec![
                vec![0, 10, 0, 0],
                vec![0, 4, 0, 1, 0, 6, 0, 2],
                vec![0, 4, 4, 3, 0, 6, 6, 4],
            ],
            num_ticks: 10,
            max_self: 6,
        };

        let stacks = collapse(&fb, FlamebearerFormat::Single).unwrap();
        assert_eq!(
            stacks,
            vec![
                CollapsedStack::new("total;b;y", 6),
                CollapsedStack::new("total;a;x", 4),
            ]
        );
    }

    #[test]
    fn test_unknown_format() {
        assert!(matches!(
            FlamebearerFormat::parse("tree"),
            Err(ProfileError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_empty_levels() {
        let fb = Flamebearer {
            names: vec![],
            levels: vec![],
            num_ticks: 0,
            max_self: 0,
        };
        assert!(collapse(&fb, FlamebearerFormat::Single).unwrap().is_empty());
    }
}
