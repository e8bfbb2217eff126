//! Clip selection as configuration data.
//!
//! Asset-specific choices ("prefer the second clip", "drop the bat tracks")
//! are expressed here instead of in adapter code.

use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LoopMode {
    /// Play once and hold the last pose.
    #[default]
    Once,
    Repeat,
}

/// Reference to a clip inside a loaded asset.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ClipRef {
    Index(usize),
    Name(String),
}

/// What an adapter knows about one clip of a loaded asset.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct ClipInfo {
    pub name: Option<String>,
    pub duration: f32,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ClipSelection {
    /// Tried in order; the first reference that exists wins.
    pub preferred: Vec<ClipRef>,
    /// Targets whose node name contains any of these (case-insensitive) are not animated.
    pub excluded_tracks: Vec<String>,
    pub loop_mode: LoopMode,
}

impl Default for ClipSelection {
    fn default() -> Self {
        Self {
            preferred: vec![ClipRef::Index(0)],
            excluded_tracks: Vec::new(),
            loop_mode: LoopMode::Once,
        }
    }
}

impl ClipSelection {
    /// Pick a clip index. Falls back to the first clip when no preferred
    /// reference matches; `None` only when `clips` is empty.
    pub fn resolve(&self, clips: &[ClipInfo]) -> Option<usize> {
        if clips.is_empty() {
            return None;
        }
        for r in &self.preferred {
            match r {
                ClipRef::Index(i) if *i < clips.len() => return Some(*i),
                ClipRef::Name(name) => {
                    if let Some(i) = clips
                        .iter()
                        .position(|c| c.name.as_deref() == Some(name.as_str()))
                    {
                        return Some(i);
                    }
                }
                _ => {}
            }
        }
        Some(0)
    }

    /// Adapters strip animation from every node this matches.
    pub fn is_track_excluded(&self, track: &str) -> bool {
        let lower = track.to_lowercase();
        self.excluded_tracks
            .iter()
            .filter(|s| !s.is_empty())
            .any(|s| lower.contains(&s.to_lowercase()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clip(name: &str) -> ClipInfo {
        ClipInfo {
            name: Some(name.into()),
            duration: 1.0,
        }
    }

    #[test]
    fn second_clip_if_present_else_first() {
        let sel = ClipSelection {
            preferred: vec![ClipRef::Index(1), ClipRef::Index(0)],
            ..Default::default()
        };
        assert_eq!(sel.resolve(&[clip("idle"), clip("swing")]), Some(1));
        assert_eq!(sel.resolve(&[clip("idle")]), Some(0));
        assert_eq!(sel.resolve(&[]), None);
    }

    #[test]
    fn name_lookup_falls_through_to_first() {
        let sel = ClipSelection {
            preferred: vec![ClipRef::Name("Swing".into())],
            ..Default::default()
        };
        assert_eq!(sel.resolve(&[clip("Idle"), clip("Swing")]), Some(1));
        assert_eq!(sel.resolve(&[clip("Idle"), clip("Walk")]), Some(0));
    }

    #[test]
    fn excluded_tracks_match_case_insensitive_substrings() {
        let sel = ClipSelection {
            excluded_tracks: vec!["bat".into()],
            ..Default::default()
        };
        let nodes = ["Spine", "Bat_Handle", "RightHand"];
        let kept: Vec<&str> = nodes
            .into_iter()
            .filter(|n| !sel.is_track_excluded(n))
            .collect();
        assert_eq!(kept, vec!["Spine", "RightHand"]);
        assert!(sel.is_track_excluded("BAT"));
        assert!(!ClipSelection::default().is_track_excluded("Bat"));
    }
}
