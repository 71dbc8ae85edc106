//! # Trust Score Aggregator
//!
//! Turns an owner's verified testimonials into a single reputation score in
//! `10..=100` plus at most two improvement hints. The score is recomputed from
//! scratch on every read; nothing here holds state.
//!
//! ## Weights
//!
//! 1.  **Setup**: 10 points once there is anything to score. With no verified
//!     records the result is exactly 10.
//! 2.  **Quality**: half of the mean record score, where a record without a
//!     score counts as 70.
//! 3.  **Volume**: 2 points per verified record, capped at 20.
//! 4.  **Media**: 5 points per record carrying a video, capped at 20.
//! 5.  **Channel**: a flat 10 if any record was verified through LinkedIn.
//!
//! The total is rounded half away from zero and clamped to 100.

use crate::model::testimonial::{Testimonial, TestimonialStatus, VerificationMethod};
use serde::{Deserialize, Serialize};

pub const SETUP_POINTS: f64 = 10.0;
pub const DEFAULT_QUALITY: f64 = 70.0;
pub const QUALITY_WEIGHT: f64 = 0.5;
pub const POINTS_PER_RECORD: u32 = 2;
pub const VOLUME_CAP: u32 = 20;
pub const POINTS_PER_VIDEO: u32 = 5;
pub const MEDIA_CAP: u32 = 20;
pub const LINKEDIN_POINTS: u32 = 10;
pub const SCORE_CEILING: u8 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HintKind {
    AddVideoTestimonial,
    ConnectLinkedin,
}

/// An informational suggestion and the points it could still add.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImprovementHint {
    pub kind: HintKind,
    pub points: u32,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrustScore {
    pub score: u8,
    pub verified_count: usize,
    pub hints: Vec<ImprovementHint>,
}

/// Computes the trust score of `records`.
///
/// Callers are expected to pass an owner's verified records; anything that is
/// not `verified` is ignored all the same, so the result never depends on
/// pending or rejected proof. Order is irrelevant.
pub fn compute(records: &[Testimonial]) -> TrustScore {
    let verified: Vec<&Testimonial> = records
        .iter()
        .filter(|r| r.status == TestimonialStatus::Verified)
        .collect();

    let video_count = verified.iter().filter(|r| r.has_video()).count() as u32;
    let has_linkedin = verified
        .iter()
        .any(|r| r.verification_method == VerificationMethod::Linkedin);

    let media_points = (video_count * POINTS_PER_VIDEO).min(MEDIA_CAP);
    let channel_points = if has_linkedin { LINKEDIN_POINTS } else { 0 };

    TrustScore {
        score: total(&verified, media_points, channel_points),
        verified_count: verified.len(),
        hints: hints(media_points, channel_points),
    }
}

fn total(verified: &[&Testimonial], media_points: u32, channel_points: u32) -> u8 {
    if verified.is_empty() {
        return SETUP_POINTS as u8;
    }

    let quality_sum: f64 = verified
        .iter()
        .map(|r| r.score.map(f64::from).unwrap_or(DEFAULT_QUALITY))
        .sum();
    let avg_quality = quality_sum / verified.len() as f64;
    let count = u32::try_from(verified.len()).unwrap_or(u32::MAX);
    let volume_points = count.saturating_mul(POINTS_PER_RECORD).min(VOLUME_CAP);

    let running = SETUP_POINTS
        + avg_quality * QUALITY_WEIGHT
        + f64::from(volume_points)
        + f64::from(media_points)
        + f64::from(channel_points);

    running.round().min(f64::from(SCORE_CEILING)) as u8
}

fn hints(media_points: u32, channel_points: u32) -> Vec<ImprovementHint> {
    let mut hints = Vec::new();
    let video_headroom = MEDIA_CAP - media_points;
    if video_headroom > 0 {
        hints.push(ImprovementHint {
            kind: HintKind::AddVideoTestimonial,
            points: video_headroom,
            message: format!("Add a video testimonial (up to +{video_headroom})"),
        });
    }
    if channel_points == 0 {
        hints.push(ImprovementHint {
            kind: HintKind::ConnectLinkedin,
            points: LINKEDIN_POINTS,
            message: format!("Connect LinkedIn (+{LINKEDIN_POINTS})"),
        });
    }
    hints
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::testimonial::{CardStyle, Origin};
    use chrono::Utc;

    fn record(score: Option<u8>, video: bool, method: VerificationMethod) -> Testimonial {
        Testimonial {
            id: uuid_like(),
            owner_id: "owner".to_string(),
            client_name: "Client".to_string(),
            client_company: String::new(),
            client_email: None,
            text: "Solid".to_string(),
            video_ref: video.then(|| "videos/clip.mp4".to_string()),
            avatar_ref: None,
            verification_method: method,
            status: TestimonialStatus::Verified,
            score,
            sentiment: None,
            keywords: Vec::new(),
            analysis_reasoning: None,
            score_estimated: false,
            card_style: CardStyle::White,
            origin: Origin::Owner,
            created_at: Utc::now(),
            verified_at: None,
            verification_token: None,
            token_expires_at: None,
        }
    }

    fn uuid_like() -> String {
        use std::sync::atomic::{AtomicU32, Ordering};
        static NEXT: AtomicU32 = AtomicU32::new(0);
        format!("t{}", NEXT.fetch_add(1, Ordering::Relaxed))
    }

    #[test]
    fn no_verified_records_scores_exactly_ten() {
        let result = compute(&[]);
        assert_eq!(result.score, 10);
        assert_eq!(result.verified_count, 0);
    }

    #[test]
    fn unverified_records_are_ignored() {
        let mut pending = record(Some(100), true, VerificationMethod::Linkedin);
        pending.status = TestimonialStatus::Pending;
        let mut rejected = record(Some(100), true, VerificationMethod::Linkedin);
        rejected.status = TestimonialStatus::Rejected;
        assert_eq!(compute(&[pending, rejected]).score, 10);
    }

    #[test]
    fn single_unscored_manual_record_scores_47() {
        let r = record(None, false, VerificationMethod::Manual);
        assert_eq!(compute(&[r]).score, 47);
    }

    #[test]
    fn single_scored_video_record_scores_62() {
        let r = record(Some(90), true, VerificationMethod::Manual);
        assert_eq!(compute(&[r]).score, 62);
    }

    #[test]
    fn mixed_records_score_73() {
        let records = vec![
            record(Some(100), true, VerificationMethod::Manual),
            record(Some(80), false, VerificationMethod::Linkedin),
            record(None, false, VerificationMethod::Manual),
        ];
        assert_eq!(compute(&records).score, 73);
    }

    #[test]
    fn saturates_at_one_hundred() {
        let records: Vec<_> = (0..12)
            .map(|_| record(Some(100), true, VerificationMethod::Linkedin))
            .collect();
        let result = compute(&records);
        assert_eq!(result.score, 100);
        assert!(result.hints.is_empty());
    }

    #[test]
    fn order_does_not_matter() {
        let mut records = vec![
            record(Some(40), false, VerificationMethod::Manual),
            record(Some(95), true, VerificationMethod::Email),
            record(None, true, VerificationMethod::Linkedin),
        ];
        let forward = compute(&records).score;
        records.reverse();
        assert_eq!(compute(&records).score, forward);
    }

    #[test]
    fn monotonic_in_quality_videos_and_linkedin() {
        let mut previous = 0;
        for q in (0..=100).step_by(5) {
            let records = vec![
                record(Some(q), false, VerificationMethod::Manual),
                record(Some(60), false, VerificationMethod::Manual),
            ];
            let score = compute(&records).score;
            assert!(score >= previous);
            assert!(score <= 100);
            previous = score;
        }

        let mut previous = 0;
        for videos in 0..=6 {
            let records: Vec<_> = (0..6)
                .map(|i| record(Some(75), i < videos, VerificationMethod::Manual))
                .collect();
            let score = compute(&records).score;
            assert!(score >= previous);
            previous = score;
        }

        let without = vec![
            record(Some(80), false, VerificationMethod::Manual),
            record(Some(80), false, VerificationMethod::Manual),
        ];
        let with = vec![
            record(Some(80), false, VerificationMethod::Manual),
            record(Some(80), false, VerificationMethod::Linkedin),
        ];
        assert!(compute(&with).score >= compute(&without).score);
    }

    #[test]
    fn hints_report_remaining_headroom() {
        let r = record(Some(90), true, VerificationMethod::Manual);
        let hints = compute(&[r]).hints;
        assert_eq!(
            hints,
            vec![
                ImprovementHint {
                    kind: HintKind::AddVideoTestimonial,
                    points: 15,
                    message: "Add a video testimonial (up to +15)".to_string(),
                },
                ImprovementHint {
                    kind: HintKind::ConnectLinkedin,
                    points: 10,
                    message: "Connect LinkedIn (+10)".to_string(),
                },
            ]
        );

        let linked = record(None, false, VerificationMethod::Linkedin);
        let kinds: Vec<_> = compute(&[linked]).hints.into_iter().map(|h| h.kind).collect();
        assert_eq!(kinds, vec![HintKind::AddVideoTestimonial]);
    }
}
