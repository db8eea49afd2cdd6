//! Progress reporting for file transfers

use crate::catalog::MediaKind;

/// One progress sample, sent over the transfer channel as bytes arrive
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransferProgress {
    pub kind: MediaKind,
    pub received: u64,
    pub total: Option<u64>,
}

impl TransferProgress {
    /// Completed fraction (0.0 to 1.0), when the total size is known
    pub fn fraction(&self) -> Option<f32> {
        match self.total {
            Some(total) if total > 0 => {
                Some((self.received as f64 / total as f64).min(1.0) as f32)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fraction_requires_a_known_total() {
        let unknown = TransferProgress {
            kind: MediaKind::Audio,
            received: 512,
            total: None,
        };
        assert_eq!(unknown.fraction(), None);

        let halfway = TransferProgress {
            kind: MediaKind::Audio,
            received: 512,
            total: Some(1024),
        };
        assert_eq!(halfway.fraction(), Some(0.5));
    }

    #[test]
    fn fraction_is_clamped_to_one() {
        let overshoot = TransferProgress {
            kind: MediaKind::Video,
            received: 2048,
            total: Some(1024),
        };
        assert_eq!(overshoot.fraction(), Some(1.0));
    }
}
