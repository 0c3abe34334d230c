//! Multi-format export of prediction results
//!
//! CSV, JSON and XML renditions of the same prediction set. All three carry
//! the same values: probabilities are printed with four decimals in CSV and
//! XML and as full `f32` in JSON, and timestamps use the same RFC 3339 text.
//!
//! CSV layout (text fields quoted, one LF-terminated record per line):
//!
//! ```text
//! "Species","Common Name","Probability","Confidence"
//! "Rosa canina","Dog Rose",0.8123,"high"
//! ```

use crate::analysis::result::PredictionSet;
use crate::analysis::stats::PredictionStats;
use crate::error::{ClassifyError, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use csv::{QuoteStyle, Terminator, WriterBuilder};
use serde::{Deserialize, Serialize};

/// CSV header fields
pub const CSV_HEADERS: [&str; 4] = ["Species", "Common Name", "Probability", "Confidence"];

/// The three export formats of one result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportBundle {
    /// CSV text, header plus one row per prediction
    pub csv: String,
    /// Pretty-printed JSON document
    pub json: String,
    /// XML document
    pub xml: String,
}

/// JSON export document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    /// Identifier of the classified image
    pub image_source: String,
    /// Export time (RFC 3339)
    pub timestamp: DateTime<Utc>,
    /// Ranked predictions
    pub predictions: PredictionSet,
    /// Statistics over `predictions`
    pub stats: PredictionStats,
}

/// Render a prediction set in all three formats with a shared timestamp
///
/// # Arguments
///
/// * `predictions` - Ranked predictions
/// * `stats` - Statistics over `predictions`
/// * `image_source` - Identifier written into the JSON and XML metadata
/// * `timestamp` - Export time written into the JSON and XML metadata
///
/// # Errors
///
/// Returns `ClassifyError::Export` if CSV or JSON serialization fails
///
/// # Example
///
/// ```
/// use bloom_rank::analysis::ranking::rank;
/// use bloom_rank::analysis::stats::summarize;
/// use bloom_rank::export::{export_predictions, parse_json_export};
/// use bloom_rank::labels::LabelTable;
/// use chrono::Utc;
///
/// let labels = LabelTable::from_labels(vec!["Rosa canina", "Bellis perennis"]);
/// let set = rank(&[0.8, 0.2], 2, &labels)?;
/// let bundle = export_predictions(&set, &summarize(&set), "garden.jpg", Utc::now())?;
///
/// assert!(bundle.csv.starts_with("\"Species\",\"Common Name\",\"Probability\",\"Confidence\"\n"));
/// assert!(bundle.xml.contains("<species>Rosa canina</species>"));
/// assert_eq!(parse_json_export(&bundle.json)?.predictions, set);
/// # Ok::<(), bloom_rank::ClassifyError>(())
/// ```
pub fn export_predictions(
    predictions: &PredictionSet,
    stats: &PredictionStats,
    image_source: &str,
    timestamp: DateTime<Utc>,
) -> Result<ExportBundle> {
    log::debug!(
        "Exporting {} predictions for '{}'",
        predictions.len(),
        image_source
    );

    Ok(ExportBundle {
        csv: to_csv(predictions)?,
        json: to_json(predictions, stats, image_source, timestamp)?,
        xml: to_xml(predictions, image_source, timestamp),
    })
}

/// CSV rendition: header plus one record per prediction
///
/// # Errors
///
/// Returns `ClassifyError::Export` if the CSV writer fails
pub fn to_csv(predictions: &PredictionSet) -> Result<String> {
    let mut wtr = WriterBuilder::new()
        .quote_style(QuoteStyle::NonNumeric)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(vec![]);

    wtr.write_record(CSV_HEADERS)?;
    for p in predictions {
        let probability = format!("{:.4}", p.score);
        wtr.write_record([
            p.canonical_name.as_str(),
            p.display_name.as_str(),
            probability.as_str(),
            p.confidence_band.as_str(),
        ])?;
    }

    let bytes = wtr
        .into_inner()
        .map_err(|e| ClassifyError::Export(format!("CSV flush failed: {}", e)))?;
    String::from_utf8(bytes).map_err(|e| ClassifyError::Export(format!("CSV not UTF-8: {}", e)))
}

/// Pretty-printed JSON rendition
///
/// # Errors
///
/// Returns `ClassifyError::Export` if serialization fails
pub fn to_json(
    predictions: &PredictionSet,
    stats: &PredictionStats,
    image_source: &str,
    timestamp: DateTime<Utc>,
) -> Result<String> {
    let document = ExportDocument {
        image_source: image_source.to_string(),
        timestamp,
        predictions: predictions.clone(),
        stats: *stats,
    };
    Ok(serde_json::to_string_pretty(&document)?)
}

/// XML rendition
pub fn to_xml(predictions: &PredictionSet, image_source: &str, timestamp: DateTime<Utc>) -> String {
    let mut xml = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<classifications>\n");
    xml.push_str(&format!(
        "  <metadata>\n    <imageSource>{}</imageSource>\n    <timestamp>{}</timestamp>\n  </metadata>\n",
        xml_escape(image_source),
        format_timestamp(timestamp)
    ));

    xml.push_str("  <predictions>\n");
    for p in predictions {
        xml.push_str(&format!(
            "    <prediction>\n      <species>{}</species>\n      <commonName>{}</commonName>\n      <probability>{:.4}</probability>\n      <confidence>{}</confidence>\n    </prediction>\n",
            xml_escape(&p.canonical_name),
            xml_escape(&p.display_name),
            p.score,
            p.confidence_band
        ));
    }
    xml.push_str("  </predictions>\n</classifications>");
    xml
}

/// RFC 3339 text identical to the JSON serialization of `DateTime<Utc>`
fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// Read back a JSON export
///
/// # Errors
///
/// Returns `ClassifyError::Validation` if the text is not a valid export
/// document (including prediction sets that break ordering or band rules)
pub fn parse_json_export(json: &str) -> Result<ExportDocument> {
    serde_json::from_str(json)
        .map_err(|e| ClassifyError::Validation(format!("Invalid export document: {}", e)))
}

fn xml_escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::ranking::rank;
    use crate::analysis::stats::summarize;
    use crate::labels::LabelTable;
    use chrono::TimeZone;

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 17, 9, 30, 0).unwrap()
    }

    fn sample() -> PredictionSet {
        let labels = LabelTable::from_labels(vec![
            "Rosa canina",
            "Bellis perennis",
            "Taraxacum officinale",
        ])
        .with_alias("Rosa canina", "Dog Rose");
        rank(&[0.81234, 0.15, 0.03766], 3, &labels).unwrap()
    }

    fn csv_records(csv: &str) -> Vec<Vec<String>> {
        csv::ReaderBuilder::new()
            .has_headers(false)
            .from_reader(csv.as_bytes())
            .records()
            .map(|r| r.unwrap().iter().map(str::to_string).collect())
            .collect()
    }

    #[test]
    fn test_csv_layout() {
        let csv = to_csv(&sample()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "\"Species\",\"Common Name\",\"Probability\",\"Confidence\"");
        assert_eq!(lines[1], "\"Rosa canina\",\"Dog Rose\",0.8123,\"high\"");
        assert_eq!(lines[2], "\"Bellis perennis\",\"Bellis perennis\",0.1500,\"low\"");
        assert!(csv.ends_with('\n'));
        assert!(!csv.contains('\r'));
    }

    #[test]
    fn test_csv_escapes_quotes_and_commas() {
        let labels = LabelTable::from_labels(vec!["Say \"cheese\", please"]);
        let set = rank(&[0.6], 1, &labels).unwrap();
        let csv = to_csv(&set).unwrap();
        assert!(csv.ends_with("\"Say \"\"cheese\"\", please\",\"Say \"\"cheese\"\", please\",0.6000,\"medium\"\n"));

        let records = csv_records(&csv);
        assert_eq!(records[1][0], "Say \"cheese\", please");
        assert_eq!(records[1].len(), 4);
    }

    #[test]
    fn test_json_round_trip() {
        let set = sample();
        let json = to_json(&set, &summarize(&set), "garden.jpg", fixed_time()).unwrap();
        let document = parse_json_export(&json).unwrap();

        assert_eq!(document.image_source, "garden.jpg");
        assert_eq!(document.timestamp, fixed_time());
        assert_eq!(document.predictions.len(), set.len());
        assert_eq!(document.predictions.top().unwrap().canonical_name, "Rosa canina");
        assert_eq!(document.stats, summarize(&set));
    }

    #[test]
    fn test_json_field_order() {
        let set = sample();
        let json = to_json(&set, &summarize(&set), "a.jpg", fixed_time()).unwrap();
        let source = json.find("\"imageSource\"").unwrap();
        let timestamp = json.find("\"timestamp\"").unwrap();
        let predictions = json.find("\"predictions\"").unwrap();
        let stats = json.find("\"stats\"").unwrap();
        assert!(source < timestamp && timestamp < predictions && predictions < stats);
        assert!(json.contains("2024-05-17T09:30:00"));
    }

    #[test]
    fn test_xml_escapes_and_agrees_with_csv() {
        let labels = LabelTable::from_labels(vec!["Rosa <canina>", "Bellis & co"]);
        let set = rank(&[0.75, 0.25], 2, &labels).unwrap();
        let xml = to_xml(&set, "a&b.jpg", fixed_time());

        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(xml.contains("<imageSource>a&amp;b.jpg</imageSource>"));
        assert!(xml.contains("<species>Rosa &lt;canina&gt;</species>"));
        assert!(xml.contains("<commonName>Bellis &amp; co</commonName>"));
        assert!(xml.contains("<probability>0.7500</probability>"));
        assert!(xml.contains("<confidence>high</confidence>"));
        assert_eq!(xml.matches("<prediction>").count(), 2);

        let csv = to_csv(&set).unwrap();
        assert!(csv.contains(",0.7500,\"high\""));
        assert!(csv.contains(",0.2500,\"low\""));
    }

    #[test]
    fn test_bundle_formats_agree() {
        let set = sample();
        let bundle = export_predictions(&set, &summarize(&set), "x.jpg", fixed_time()).unwrap();
        let document = parse_json_export(&bundle.json).unwrap();
        let records = csv_records(&bundle.csv);
        assert_eq!(records.len(), document.predictions.len() + 1);

        for (p, record) in document.predictions.iter().zip(&records[1..]) {
            let probability = format!("{:.4}", p.score);
            assert_eq!(record[0], p.canonical_name);
            assert_eq!(record[1], p.display_name);
            assert_eq!(record[2], probability);
            assert_eq!(record[3], p.confidence_band.as_str());
            assert!(bundle.xml.contains(&format!("<probability>{}</probability>", probability)));
        }

        let value: serde_json::Value = serde_json::from_str(&bundle.json).unwrap();
        let json_timestamp = value["timestamp"].as_str().unwrap();
        assert_eq!(json_timestamp, "2024-05-17T09:30:00Z");
        assert!(bundle
            .xml
            .contains(&format!("<timestamp>{}</timestamp>", json_timestamp)));
    }

    #[test]
    fn test_subsecond_timestamps_agree() {
        let time = fixed_time() + chrono::Duration::milliseconds(250);
        let set = sample();
        let bundle = export_predictions(&set, &summarize(&set), "x.jpg", time).unwrap();
        let value: serde_json::Value = serde_json::from_str(&bundle.json).unwrap();
        let json_timestamp = value["timestamp"].as_str().unwrap();
        assert!(bundle
            .xml
            .contains(&format!("<timestamp>{}</timestamp>", json_timestamp)));
    }

    #[test]
    fn test_empty_set_exports() {
        let set = PredictionSet::empty();
        let bundle = export_predictions(&set, &summarize(&set), "none", fixed_time()).unwrap();
        assert_eq!(csv_records(&bundle.csv), vec![CSV_HEADERS.map(str::to_string).to_vec()]);
        assert!(bundle.xml.contains("<predictions>\n  </predictions>"));
        assert!(parse_json_export(&bundle.json).unwrap().predictions.is_empty());
    }

    #[test]
    fn test_parse_rejects_invalid_document() {
        assert!(matches!(
            parse_json_export("{}"),
            Err(ClassifyError::Validation(_))
        ));
    }
}
