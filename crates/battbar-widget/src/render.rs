//! Segment plan rendering
//!
//! Turns a `SegmentPlan` into styled spans. Full segments are solid blocks
//! in the tier color, the partial segment is the same block dimmed (the
//! translucent variant), empty segments are dark shade blocks. Kept free of
//! terminal state so it can be unit tested.

use battbar_core::{SegmentPlan, SegmentState, Tier};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

/// Glyph for a full or partial segment.
const SEGMENT_GLYPH: &str = "██";

/// Glyph for an empty segment.
const EMPTY_GLYPH: &str = "░░";

/// Terminal color for a tier.
pub fn tier_color(tier: Tier) -> Color {
    match tier {
        Tier::Low => Color::Red,
        Tier::Mid => Color::Yellow,
        Tier::High => Color::Green,
    }
}

/// Render the bar, optionally followed by the percentage label.
pub fn bar_line(plan: &SegmentPlan, show_label: bool) -> Line<'static> {
    let mut spans: Vec<Span<'static>> = plan
        .segments()
        .iter()
        .map(|seg| match seg.state {
            SegmentState::Full => {
                Span::styled(SEGMENT_GLYPH, Style::default().fg(tier_color(seg.tier)))
            }
            SegmentState::Partial => Span::styled(
                SEGMENT_GLYPH,
                Style::default()
                    .fg(tier_color(seg.tier))
                    .add_modifier(Modifier::DIM),
            ),
            SegmentState::Empty => Span::styled(EMPTY_GLYPH, Style::default().fg(Color::DarkGray)),
        })
        .collect();

    if show_label {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            plan.percentage().to_string(),
            Style::default()
                .fg(tier_color(plan.tier()))
                .add_modifier(Modifier::BOLD),
        ));
    }

    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use battbar_core::{quantize, BatteryPercentage, TierPolicy, DEFAULT_STEPS};

    fn plan(p: u8, policy: TierPolicy) -> SegmentPlan {
        quantize(BatteryPercentage::new(p).unwrap(), DEFAULT_STEPS, policy)
    }

    #[test]
    fn test_tier_colors() {
        assert_eq!(tier_color(Tier::Low), Color::Red);
        assert_eq!(tier_color(Tier::Mid), Color::Yellow);
        assert_eq!(tier_color(Tier::High), Color::Green);
    }

    #[test]
    fn test_bar_has_one_span_per_segment() {
        let line = bar_line(&plan(45, TierPolicy::FillCount), false);
        assert_eq!(line.spans.len(), 10);
    }

    #[test]
    fn test_label_appended_when_requested() {
        let line = bar_line(&plan(45, TierPolicy::FillCount), true);
        assert_eq!(line.spans.len(), 12);
        assert_eq!(line.spans.last().unwrap().content, "45%");
    }

    #[test]
    fn test_partial_segment_is_dimmed() {
        let line = bar_line(&plan(45, TierPolicy::FillCount), false);
        let partial = &line.spans[4];
        assert!(partial.style.add_modifier.contains(Modifier::DIM));
        assert_eq!(partial.style.fg, Some(Color::Yellow));
    }

    #[test]
    fn test_empty_segments_are_dark() {
        let line = bar_line(&plan(0, TierPolicy::FillCount), false);
        for span in &line.spans {
            assert_eq!(span.content, EMPTY_GLYPH);
            assert_eq!(span.style.fg, Some(Color::DarkGray));
        }
    }

    #[test]
    fn test_index_band_colors_follow_position() {
        let line = bar_line(&plan(100, TierPolicy::IndexBand), false);
        assert_eq!(line.spans[0].style.fg, Some(Color::Red));
        assert_eq!(line.spans[4].style.fg, Some(Color::Yellow));
        assert_eq!(line.spans[9].style.fg, Some(Color::Green));
    }
}
