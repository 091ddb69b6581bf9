pub type Score = i32;

/// Window bound; strictly larger than any score the evaluator produces.
pub const SCORE_INFINITY: Score = 30_000;
/// Magnitude of a forced win/loss. Material swings never get close to it.
pub const MATE_SCORE: Score = 9_999;
pub const DEFAULT_DEPTH: u8 = 4;
pub const MAX_DEPTH: u8 = 32;

#[derive(Clone, Copy, Debug)]
pub struct EngineConfig {
    pub depth: u8,
}

impl EngineConfig {
    pub fn with_depth(depth: u8) -> Self {
        Self {
            depth: depth.clamp(1, MAX_DEPTH),
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            depth: DEFAULT_DEPTH,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SearchResult<M> {
    pub best_move: Option<M>,
    pub score: Score,
    pub depth: u8,
    pub nodes: u64,
}

pub fn is_mate_score(score: Score) -> bool {
    score.abs() >= MATE_SCORE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_depth_is_clamped() {
        assert_eq!(EngineConfig::with_depth(0).depth, 1);
        assert_eq!(EngineConfig::with_depth(200).depth, MAX_DEPTH);
        assert_eq!(EngineConfig::default().depth, 4);
    }

    #[test]
    fn test_mate_score_detection() {
        assert!(is_mate_score(MATE_SCORE));
        assert!(is_mate_score(-MATE_SCORE));
        assert!(!is_mate_score(3900));
    }
}
