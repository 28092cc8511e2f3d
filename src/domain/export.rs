use serde::{Deserialize, Serialize};

use crate::domain::types::{ComparisonResult, NormalizedTrack, Provider};

pub const DEFAULT_EXPORT_FILENAME: &str = "playlist-comparison.csv";
pub const CSV_CONTENT_TYPE: &str = "text/csv";

const HEADER: [&str; 9] = [
    "Status",
    "Title",
    "Artist",
    "Album",
    "Duration (seconds)",
    "Left Provider",
    "Right Provider",
    "Left Track ID",
    "Right Track ID",
];

const STATUS_ONLY_LEFT: &str = "Only in Left";
const STATUS_ONLY_RIGHT: &str = "Only in Right";
const STATUS_IN_BOTH: &str = "In Both";

/// Which partitions of a comparison to export.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "camelCase")]
pub enum ExportFilter {
    #[default]
    All,
    OnlyLeft,
    OnlyRight,
    Both,
}

impl ExportFilter {
    fn includes_left(self) -> bool {
        matches!(self, ExportFilter::All | ExportFilter::OnlyLeft)
    }

    fn includes_right(self) -> bool {
        matches!(self, ExportFilter::All | ExportFilter::OnlyRight)
    }

    fn includes_both(self) -> bool {
        matches!(self, ExportFilter::All | ExportFilter::Both)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("CSV output is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Which provider/id columns a row fills in.
struct RowSides<'a> {
    left_provider: Option<Provider>,
    right_provider: Option<Provider>,
    left_track_id: Option<&'a str>,
    right_track_id: Option<&'a str>,
}

fn write_track<W: std::io::Write>(
    wtr: &mut csv::Writer<W>,
    status: &str,
    track: &NormalizedTrack,
    sides: RowSides<'_>,
) -> Result<(), csv::Error> {
    // A zero duration is as unknown as a missing one.
    let duration = track
        .duration_sec
        .filter(|&d| d > 0)
        .map(|d| d.to_string())
        .unwrap_or_default();
    wtr.write_record([
        status,
        track.title.as_str(),
        track.artist.as_str(),
        track.album.as_deref().unwrap_or_default(),
        duration.as_str(),
        sides.left_provider.map(|p| p.as_str()).unwrap_or_default(),
        sides.right_provider.map(|p| p.as_str()).unwrap_or_default(),
        sides.left_track_id.unwrap_or_default(),
        sides.right_track_id.unwrap_or_default(),
    ])
}

/// Generate CSV from comparison results
///
/// `None` renders every partition, as does [`ExportFilter::All`]: only-left
/// rows, then only-right rows, then matched rows. Fields are quoted only when
/// they contain a delimiter, a quote or a line break. Rows are separated by
/// `\n` with no trailing newline.
pub fn to_csv(
    result: &ComparisonResult,
    filter: Option<ExportFilter>,
) -> Result<String, ExportError> {
    let filter = filter.unwrap_or_default();
    let mut wtr = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Necessary)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    wtr.write_record(HEADER)?;

    if filter.includes_left() {
        for track in &result.only_in_left {
            write_track(
                &mut wtr,
                STATUS_ONLY_LEFT,
                track,
                RowSides {
                    left_provider: Some(result.left.provider),
                    right_provider: None,
                    left_track_id: track.provider_track_id.as_deref(),
                    right_track_id: None,
                },
            )?;
        }
    }

    if filter.includes_right() {
        for track in &result.only_in_right {
            write_track(
                &mut wtr,
                STATUS_ONLY_RIGHT,
                track,
                RowSides {
                    left_provider: None,
                    right_provider: Some(result.right.provider),
                    left_track_id: None,
                    right_track_id: track.provider_track_id.as_deref(),
                },
            )?;
        }
    }

    if filter.includes_both() {
        for pair in &result.in_both {
            write_track(
                &mut wtr,
                STATUS_IN_BOTH,
                &pair.left,
                RowSides {
                    left_provider: Some(result.left.provider),
                    right_provider: Some(result.right.provider),
                    left_track_id: pair.left.provider_track_id.as_deref(),
                    right_track_id: pair.right.provider_track_id.as_deref(),
                },
            )?;
        }
    }

    let bytes = wtr
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))?;
    let mut out = String::from_utf8(bytes)?;
    if out.ends_with('\n') {
        out.pop();
    }
    Ok(out)
}
