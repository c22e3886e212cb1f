//! Dataset assembly: turns raw historical records into chart series

use super::ChartError;
use crate::api::bitcoinaverage::models::HistoricalRecord;
use crate::models::chart::{ChartData, DataSeries, PALETTE};
use crate::models::period::HistoricalPeriod;

/// Derive a time label from a record timestamp
///
/// Alltime keeps the date-only prefix, Daily/Monthly keep the
/// hour/minute-bearing slice, Unset passes the timestamp through.
pub(crate) fn format_label(
    period: HistoricalPeriod,
    timestamp: &str,
) -> Result<String, ChartError> {
    let slice = match period {
        HistoricalPeriod::Alltime => timestamp.get(..10),
        HistoricalPeriod::Daily | HistoricalPeriod::Monthly => timestamp.get(5..17),
        HistoricalPeriod::Unset => Some(timestamp),
    };

    slice.map(str::to_string).ok_or_else(|| {
        ChartError::Transform(format!(
            "Timestamp '{}' is too short for a {} label",
            timestamp, period
        ))
    })
}

/// Build one asset's series from its records and append it to the chart
///
/// Values keep the input order, the label axis is replaced with this
/// series' labels, and the fill color comes from the palette at the cursor
/// (wrapping past the palette end). The incoming label count must match the
/// existing axis when series are already present.
pub(crate) fn append_series(
    chart: &mut ChartData,
    next_color: &mut usize,
    records: &[HistoricalRecord],
    period: HistoricalPeriod,
    legend: &str,
) -> Result<(), ChartError> {
    let values: Vec<f64> = records.iter().map(|r| r.average).collect();
    let labels = records
        .iter()
        .map(|r| format_label(period, &r.time))
        .collect::<Result<Vec<String>, ChartError>>()?;

    if !chart.datasets.is_empty() && chart.labels.len() != labels.len() {
        return Err(ChartError::Transform(format!(
            "Series '{}' has {} points but the chart axis has {}",
            legend,
            labels.len(),
            chart.labels.len()
        )));
    }

    let color = PALETTE[*next_color % PALETTE.len()];
    *next_color += 1;

    chart.datasets.push(DataSeries {
        legend: legend.to_string(),
        values,
        color: color.to_string(),
    });
    chart.labels = labels;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(time: &str, average: f64) -> HistoricalRecord {
        HistoricalRecord {
            time: time.to_string(),
            average,
        }
    }

    #[test]
    fn test_alltime_label_keeps_date_prefix() {
        let label = format_label(HistoricalPeriod::Alltime, "2020-01-02 03:04:05").unwrap();
        assert_eq!(label, "2020-01-02");
    }

    #[test]
    fn test_daily_label_slices_twelve_chars_at_offset_five() {
        let label = format_label(HistoricalPeriod::Daily, "2020-01-02 03:04:05").unwrap();
        assert_eq!(label, "01-02 03:04:");
        let monthly = format_label(HistoricalPeriod::Monthly, "2020-01-02 03:04:05").unwrap();
        assert_eq!(monthly, label);
    }

    #[test]
    fn test_unset_label_is_identity() {
        let raw = "whatever the source sent";
        assert_eq!(format_label(HistoricalPeriod::Unset, raw).unwrap(), raw);
    }

    #[test]
    fn test_short_timestamp_is_a_transform_error() {
        let err = format_label(HistoricalPeriod::Daily, "2020-01").unwrap_err();
        assert!(matches!(err, ChartError::Transform(_)));
    }

    #[test]
    fn test_append_assigns_palette_colors_in_order() {
        let mut chart = ChartData::default();
        chart.clear();
        let mut cursor = 0;

        let records = vec![rec("2020-01-01", 1.0), rec("2020-01-02", 2.0)];
        append_series(&mut chart, &mut cursor, &records, HistoricalPeriod::Alltime, "BTC")
            .unwrap();
        append_series(&mut chart, &mut cursor, &records, HistoricalPeriod::Alltime, "ETH")
            .unwrap();

        assert_eq!(cursor, 2);
        assert_eq!(chart.datasets[0].color, PALETTE[0]);
        assert_eq!(chart.datasets[1].color, PALETTE[1]);
        assert_eq!(chart.labels, vec!["2020-01-01", "2020-01-02"]);
    }

    #[test]
    fn test_palette_wraps_after_seven_series() {
        let mut chart = ChartData::default();
        chart.clear();
        let mut cursor = 0;
        let records = vec![rec("2020-01-01", 1.0)];

        for i in 0..8 {
            append_series(
                &mut chart,
                &mut cursor,
                &records,
                HistoricalPeriod::Alltime,
                &format!("A{}", i),
            )
            .unwrap();
        }

        assert_eq!(cursor, 8);
        assert_eq!(chart.datasets[7].color, PALETTE[0]);
    }

    #[test]
    fn test_label_count_mismatch_is_rejected() {
        let mut chart = ChartData::default();
        chart.clear();
        let mut cursor = 0;

        let three = vec![
            rec("2020-01-01", 1.0),
            rec("2020-01-02", 2.0),
            rec("2020-01-03", 3.0),
        ];
        let two = vec![rec("2020-01-01", 1.0), rec("2020-01-02", 2.0)];

        append_series(&mut chart, &mut cursor, &three, HistoricalPeriod::Alltime, "BTC")
            .unwrap();
        let err =
            append_series(&mut chart, &mut cursor, &two, HistoricalPeriod::Alltime, "ETH")
                .unwrap_err();

        assert!(matches!(err, ChartError::Transform(_)));
        // the mismatched series must not have been appended
        assert_eq!(chart.datasets.len(), 1);
        assert_eq!(cursor, 1);
    }
}
