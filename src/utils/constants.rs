/// Token pair that marks the start of an observation header line
pub const HEADER_MARKER_WORD: &str = "Date";
pub const HEADER_MARKER_SEP: &str = ":";

/// Header line token positions (whitespace-split)
pub const HEADER_TAG_ID_POS: usize = 0;
pub const HEADER_DATE_POS: usize = 3;
pub const HEADER_TIME_POS: usize = 4;
pub const HEADER_LC_POS: usize = 7;

/// Location line token positions (whitespace-split)
pub const LOCATION_LAT_POS: usize = 2;
pub const LOCATION_LON_POS: usize = 5;

/// Hemisphere suffix codes
pub const LAT_POSITIVE: char = 'N';
pub const LAT_NEGATIVE: char = 'S';
pub const LON_POSITIVE: char = 'E';
pub const LON_NEGATIVE: char = 'W';

/// Coordinate bounds (decimal degrees)
pub const MIN_LATITUDE: f64 = -90.0;
pub const MAX_LATITUDE: f64 = 90.0;
pub const MIN_LONGITUDE: f64 = -180.0;
pub const MAX_LONGITUDE: f64 = 180.0;

/// Documentation file shipped alongside ARGOS data downloads; never parsed
pub const README_FILE: &str = "README.txt";

/// Timestamp layout produced from the date and time tokens
pub const TIMESTAMP_FORMAT: &str = "%d/%m/%y %H:%M:%S";

/// Processing defaults
pub const DEFAULT_BATCH_SIZE: usize = 1000;
pub const DEFAULT_ROW_GROUP_SIZE: usize = 10000;
pub const DEFAULT_BUFFER_SIZE: usize = 8192 * 16; // 128KB

/// Parquet compression options
pub const COMPRESSION_SNAPPY: &str = "snappy";
pub const COMPRESSION_GZIP: &str = "gzip";
pub const COMPRESSION_LZ4: &str = "lz4";
pub const COMPRESSION_ZSTD: &str = "zstd";
pub const COMPRESSION_NONE: &str = "none";
