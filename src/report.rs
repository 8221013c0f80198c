use std::io::Write;

use anyhow::{Context, Result};
use rusty_chroma::data::model::ChromatogramData;

use crate::config::ViewerConfig;

/// Write the apex summary and the filter outcome as plain text.
///
/// Analysis failures are propagated with context; nothing is written then.
pub fn write_report<W: Write>(
    out: &mut W,
    data: &ChromatogramData,
    config: &ViewerConfig,
) -> Result<()> {
    let summary = data.apex_summary().context("locating apex")?;
    let kept = if config.apply_filter {
        data.passing_indices(config.threshold)
            .context("filtering transitions")?
    } else {
        (0..data.len()).collect()
    };

    writeln!(
        out,
        "apex index {} at time {:.4} (TIC {:.4})",
        summary.peak_index, summary.peak_time, summary.tic_at_apex
    )?;
    if config.apply_filter {
        writeln!(
            out,
            "threshold {:.4}: {} of {} transitions kept",
            config.threshold,
            kept.len(),
            data.len()
        )?;
    }
    writeln!(out, "{:<24} {:>14} {:>10}  kept", "transition", "raw", "relative")?;
    for (i, name) in data.names().enumerate() {
        let mark = if kept.contains(&i) { "yes" } else { "no" };
        writeln!(
            out,
            "{:<24} {:>14.4} {:>10.4}  {mark}",
            name, summary.raw[i], summary.relative[i]
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use rusty_chroma::analysis::AnalysisError;
    use rusty_chroma::data::model::Transition;

    use super::*;

    fn scenario_a() -> ChromatogramData {
        ChromatogramData::try_new(
            vec![0.0, 1.0, 2.0],
            vec![
                Transition::new("y7", vec![1.0, 2.0, 1.0]),
                Transition::new("b3", vec![0.0, 1.0, 0.0]),
            ],
        )
        .unwrap()
    }

    #[test]
    fn report_lists_every_transition() {
        let config = ViewerConfig {
            threshold: 0.6,
            ..ViewerConfig::default()
        };
        let mut out = Vec::new();
        write_report(&mut out, &scenario_a(), &config).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("apex index 1 at time 1.0000"));
        assert!(text.contains("1 of 2 transitions kept"));
        assert!(text.lines().any(|l| l.starts_with("b3") && l.ends_with("no")));
        assert!(text.lines().any(|l| l.starts_with("y7") && l.ends_with("yes")));
    }

    #[test]
    fn report_stops_when_everything_is_filtered() {
        let config = ViewerConfig {
            threshold: 1.5,
            ..ViewerConfig::default()
        };
        let mut out = Vec::new();
        let err = write_report(&mut out, &scenario_a(), &config).unwrap_err();
        assert_eq!(
            err.downcast_ref::<AnalysisError>(),
            Some(&AnalysisError::AllFilteredOut { threshold: 1.5 })
        );
        assert!(out.is_empty());
    }
}
