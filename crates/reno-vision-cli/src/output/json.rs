//! JSON record output adapter.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use reno_vision_core::domain::AnalysisRecord;
use reno_vision_core::ports::RecordOutput;

/// Writes analysis records as indented JSON, one document per record.
pub struct JsonRecordWriter {
    writer: Mutex<Box<dyn Write + Send>>,
}

impl JsonRecordWriter {
    /// Creates a writer targeting stdout.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(Box::new(io::stdout()))
    }

    /// Creates a writer targeting the given file, truncating it.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created.
    pub fn to_file(path: &Path) -> Result<Self> {
        let file = File::create(path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        Ok(Self::new(Box::new(file)))
    }

    /// Creates a writer over an arbitrary sink.
    #[must_use]
    pub fn new(writer: Box<dyn Write + Send>) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }
}

impl RecordOutput for JsonRecordWriter {
    #[allow(clippy::significant_drop_tightening)]
    fn write(&self, record: &AnalysisRecord) -> Result<()> {
        // 2-space indentation
        let json = serde_json::to_string_pretty(record)?;
        let mut writer = self
            .writer
            .lock()
            .map_err(|e| anyhow::anyhow!("Lock poisoned: {e}"))?;
        writeln!(writer, "{json}")?;
        Ok(())
    }

    #[allow(clippy::significant_drop_tightening)]
    fn flush(&self) -> Result<()> {
        let mut writer = self
            .writer
            .lock()
            .map_err(|e| anyhow::anyhow!("Lock poisoned: {e}"))?;
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::{Arc, Mutex, PoisonError};

    use reno_vision_core::domain::{DetectionSet, ExifSummary, RoomType};

    use super::*;

    #[derive(Clone)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn sample_record() -> AnalysisRecord {
        AnalysisRecord {
            filename: "kitchen.jpg".into(),
            file_path: "/photos/kitchen.jpg".into(),
            sha256: "00".repeat(32),
            detected_objects: DetectionSet::new(),
            room_type: RoomType::Kitchen,
            room_confidence: 0.75,
            classification_reasoning: "Kitchen appliances detected".into(),
            features: vec![],
            shapes_detected: 10,
            resonance_points: 2,
            processing_time_ms: 1.5,
            exif: ExifSummary::default(),
            quality_score: 0.5,
            complexity_score: 0.25,
            analyzed_at: "2026-01-01T00:00:00Z".into(),
        }
    }

    #[test]
    fn test_record_written_with_two_space_indent() {
        let buffer = SharedBuffer(Arc::new(Mutex::new(Vec::new())));
        let writer = JsonRecordWriter::new(Box::new(buffer.clone()));

        writer.write(&sample_record()).unwrap();
        writer.flush().unwrap();

        let bytes = buffer.0.lock().unwrap().clone();
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.contains("\n  \"filename\": \"kitchen.jpg\""));
        assert!(text.contains("\"room_type\": \"kitchen\""));
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn test_to_file_writes_parseable_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");

        let writer = JsonRecordWriter::to_file(&path).unwrap();
        writer.write(&sample_record()).unwrap();
        writer.flush().unwrap();
        drop(writer);

        let text = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["room_type"], "kitchen");
        assert_eq!(value["shapes_detected"], 10);
    }
}
