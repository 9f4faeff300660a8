use crate::error::{ProcessingError, Result};
use crate::models::FixCandidate;
use crate::utils::constants::{
    DEFAULT_BUFFER_SIZE, HEADER_DATE_POS, HEADER_LC_POS, HEADER_MARKER_SEP, HEADER_MARKER_WORD,
    HEADER_TAG_ID_POS, HEADER_TIME_POS, LOCATION_LAT_POS, LOCATION_LON_POS,
};
use encoding_rs::WINDOWS_1252;
use memmap2::Mmap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Reader for ARGOS satellite tracking files
///
/// One logical observation spans two physical lines: a header line carrying
/// tag id, date, time and location class, and the immediately following
/// location line carrying the raw coordinate tokens. The reader scans
/// forward once; whenever a header is recognized the next line is consumed
/// as the location line before the outer scan resumes. All other lines
/// (transmission diagnostics, sensor dumps) are inert.
pub struct ArgosReader {
    use_mmap: bool,
}

impl ArgosReader {
    pub fn new() -> Self {
        Self { use_mmap: false }
    }

    pub fn with_mmap(use_mmap: bool) -> Self {
        Self { use_mmap }
    }

    /// Stream fix candidates from a file
    ///
    /// The iterator yields one item per header line encountered. Structural
    /// problems with an individual record (truncated pair, short line) are
    /// yielded as errors so the caller can tally them without losing the
    /// rest of the file.
    pub fn scan(&self, path: &Path) -> Result<FixIterator> {
        let source = if self.use_mmap {
            let file = File::open(path)?;
            let mmap = unsafe { Mmap::map(&file)? };
            let content = decode_content(&mmap);
            LineSource::Decoded(
                content
                    .lines()
                    .map(|l| l.to_string())
                    .collect::<Vec<_>>()
                    .into_iter(),
            )
        } else {
            let file = File::open(path)?;
            LineSource::Buffered {
                reader: BufReader::with_capacity(DEFAULT_BUFFER_SIZE, file),
                buf: Vec::new(),
            }
        };

        Ok(FixIterator { source })
    }
}

impl Default for ArgosReader {
    fn default() -> Self {
        Self::new()
    }
}

/// Decode receiver output, falling back to Windows-1252 for non-UTF-8 bytes
fn decode_content(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => {
            let (decoded, _, _) = WINDOWS_1252.decode(bytes);
            decoded.into_owned()
        }
    }
}

fn decode_line(bytes: &[u8]) -> String {
    let decoded = decode_content(bytes);
    decoded
        .trim_end_matches(|c| c == '\r' || c == '\n')
        .to_string()
}

/// True when the line carries the observation header marker: the contiguous
/// token pair `Date` `:`
fn is_header_line(line: &str) -> bool {
    let mut tokens = line.split_whitespace();
    let mut previous = tokens.next();

    for token in tokens {
        if previous == Some(HEADER_MARKER_WORD) && token == HEADER_MARKER_SEP {
            return true;
        }
        previous = Some(token);
    }

    false
}

fn token_at<'a>(tokens: &[&'a str], line_kind: &'static str, index: usize) -> Result<&'a str> {
    tokens
        .get(index)
        .copied()
        .ok_or(ProcessingError::MissingField { line_kind, index })
}

/// Named accessors over the fixed header-line token positions
///
/// The positions are a contract of the upstream format, not a choice:
/// token 0 is the tag id, 3 the date, 4 the time, 7 the location class.
#[derive(Debug)]
struct HeaderFields {
    tag_id: String,
    date: String,
    time: String,
    location_class: String,
}

impl HeaderFields {
    fn parse(line: &str) -> Result<Self> {
        let tokens: Vec<&str> = line.split_whitespace().collect();

        Ok(Self {
            tag_id: token_at(&tokens, "Header", HEADER_TAG_ID_POS)?.to_string(),
            date: token_at(&tokens, "Header", HEADER_DATE_POS)?.to_string(),
            time: token_at(&tokens, "Header", HEADER_TIME_POS)?.to_string(),
            location_class: token_at(&tokens, "Header", HEADER_LC_POS)?.to_string(),
        })
    }
}

/// Named accessors over the fixed location-line token positions
///
/// Token 2 is the latitude, token 5 the longitude.
struct LocationFields {
    lat_raw: String,
    lon_raw: String,
}

impl LocationFields {
    fn parse(line: &str) -> Result<Self> {
        let tokens: Vec<&str> = line.split_whitespace().collect();

        Ok(Self {
            lat_raw: token_at(&tokens, "Location", LOCATION_LAT_POS)?.to_string(),
            lon_raw: token_at(&tokens, "Location", LOCATION_LON_POS)?.to_string(),
        })
    }
}

enum LineSource {
    Buffered {
        reader: BufReader<File>,
        buf: Vec<u8>,
    },
    Decoded(std::vec::IntoIter<String>),
}

impl LineSource {
    fn next_line(&mut self) -> Option<Result<String>> {
        match self {
            LineSource::Buffered { reader, buf } => {
                buf.clear();
                match reader.read_until(b'\n', buf) {
                    Ok(0) => None,
                    Ok(_) => Some(Ok(decode_line(buf))),
                    Err(e) => Some(Err(e.into())),
                }
            }
            LineSource::Decoded(lines) => lines.next().map(Ok),
        }
    }
}

/// Single-pass streaming iterator over the fix candidates in one file
pub struct FixIterator {
    source: LineSource,
}

impl FixIterator {
    fn read_candidate(&mut self, header_line: &str) -> Result<FixCandidate> {
        let header = HeaderFields::parse(header_line)?;

        let location_line = match self.source.next_line() {
            None => {
                return Err(ProcessingError::TruncatedRecord {
                    tag_id: header.tag_id,
                })
            }
            Some(Err(e)) => return Err(e),
            Some(Ok(line)) => line,
        };

        let location = LocationFields::parse(&location_line)?;

        Ok(FixCandidate {
            tag_id: header.tag_id,
            date: header.date,
            time: header.time,
            location_class: header.location_class,
            lat_raw: location.lat_raw,
            lon_raw: location.lon_raw,
        })
    }
}

impl Iterator for FixIterator {
    type Item = Result<FixCandidate>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.source.next_line()? {
                Ok(line) => line,
                Err(e) => return Some(Err(e)),
            };

            if !is_header_line(&line) {
                continue;
            }

            return Some(self.read_candidate(&line));
        }
    }
}
