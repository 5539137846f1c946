use crate::utils::error::Result;
use crate::utils::validation::{validate_non_empty, validate_positive_number, validate_range, Validate};
use serde::{Deserialize, Deserializer};
use std::path::PathBuf;

/// Provider status code that marks a successful lookup.
pub const SUCCESS_CODE: i64 = 200;

pub const DEFAULT_RESULT_INDEX: i64 = 1;
pub const DEFAULT_QUALITY: i64 = 11;
pub const QUALITY_RANGE: (i64, i64) = (1, 14);

/// One search request: keyword, 1-based result index and quality tier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackQuery {
    pub keyword: String,
    pub result_index: i64,
    pub quality_level: i64,
}

impl TrackQuery {
    pub fn new(keyword: impl Into<String>, result_index: i64, quality_level: i64) -> Self {
        Self {
            keyword: keyword.into(),
            result_index,
            quality_level,
        }
    }

    /// Whether the quality selector lies inside the range the provider documents.
    pub fn quality_in_range(&self) -> bool {
        validate_range("quality", self.quality_level, QUALITY_RANGE.0, QUALITY_RANGE.1).is_ok()
    }

    pub fn quality_tier_name(&self) -> Option<&'static str> {
        match self.quality_level {
            4 => Some("standard"),
            8 => Some("HQ"),
            11 => Some("lossless"),
            14 => Some("master"),
            _ => None,
        }
    }
}

impl Validate for TrackQuery {
    // quality 只做警告，原樣轉給上游
    fn validate(&self) -> Result<()> {
        validate_non_empty("search keyword (-s)", &self.keyword)?;
        validate_positive_number("result index (-n)", self.result_index, 1)?;
        Ok(())
    }
}

/// JSON envelope returned by the metadata endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct TrackResponse {
    pub code: i64,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub msg: String,
    #[serde(default)]
    pub data: Option<TrackMetadata>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct TrackMetadata {
    pub id: Option<u64>,
    #[serde(rename = "song", deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub subtitle: String,
    #[serde(rename = "singer", deserialize_with = "null_as_empty")]
    pub performer: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub album: String,
    #[serde(rename = "pay", deserialize_with = "null_as_empty")]
    pub pay_tier: String,
    #[serde(rename = "time", deserialize_with = "null_as_empty")]
    pub duration: String,
    pub bpm: Option<u32>,
    #[serde(rename = "quality", deserialize_with = "null_as_empty")]
    pub quality_label: String,
    #[serde(rename = "interval", deserialize_with = "null_as_empty")]
    pub sample_interval_label: String,
    #[serde(rename = "size", deserialize_with = "null_as_empty")]
    pub size_label: String,
    #[serde(rename = "kbps", deserialize_with = "null_as_empty")]
    pub bitrate_label: String,
    #[serde(rename = "cover", deserialize_with = "null_as_empty")]
    pub cover_url: String,
    #[serde(rename = "link", deserialize_with = "null_as_empty")]
    pub page_url: String,
    #[serde(rename = "url", deserialize_with = "null_as_empty")]
    pub audio_url: String,
}

/// A track written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedTrack {
    pub path: PathBuf,
    pub bytes_written: u64,
}

// 上游有時對字串欄位回傳 null
fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::ErrorKind;

    #[test]
    fn test_query_validation() {
        assert!(TrackQuery::new("稻香", 1, 11).validate().is_ok());
        assert!(TrackQuery::new("稻香", 3, 99).validate().is_ok());

        let empty = TrackQuery::new("", 1, 11).validate().unwrap_err();
        assert_eq!(empty.kind(), ErrorKind::Usage);

        let zero_index = TrackQuery::new("稻香", 0, 11).validate().unwrap_err();
        assert_eq!(zero_index.kind(), ErrorKind::Usage);
    }

    #[test]
    fn test_quality_helpers() {
        assert!(TrackQuery::new("a", 1, 1).quality_in_range());
        assert!(TrackQuery::new("a", 1, 14).quality_in_range());
        assert!(!TrackQuery::new("a", 1, 15).quality_in_range());
        assert_eq!(TrackQuery::new("a", 1, 11).quality_tier_name(), Some("lossless"));
        assert_eq!(TrackQuery::new("a", 1, 5).quality_tier_name(), None);
    }

    #[test]
    fn test_decode_full_record() {
        let body = serde_json::json!({
            "code": 200,
            "msg": "",
            "data": {
                "id": 97773,
                "song": "稻香",
                "subtitle": "",
                "singer": "周杰伦",
                "album": "魔杰座",
                "pay": "付费",
                "time": "2008-10-15",
                "bpm": 100,
                "quality": "无损音质",
                "interval": "3分43秒",
                "size": "24.6MB",
                "kbps": "924kbps",
                "cover": "https://y.example/cover.jpg",
                "link": "https://y.example/song?songmid=003aAYrm3GE0Ac",
                "url": "https://cdn.example/track.flac"
            }
        });

        let response: TrackResponse = serde_json::from_value(body).unwrap();
        assert_eq!(response.code, SUCCESS_CODE);

        let data = response.data.unwrap();
        assert_eq!(data.id, Some(97773));
        assert_eq!(data.title, "稻香");
        assert_eq!(data.performer, "周杰伦");
        assert_eq!(data.bpm, Some(100));
        assert_eq!(data.quality_label, "无损音质");
        assert_eq!(data.bitrate_label, "924kbps");
        assert_eq!(data.audio_url, "https://cdn.example/track.flac");
    }

    #[test]
    fn test_decode_sparse_record() {
        let body = r#"{"code":200,"data":{"singer":"周杰伦","song":"稻香","url":"https://cdn.example/track.mp3","album":null}}"#;
        let response: TrackResponse = serde_json::from_str(body).unwrap();

        assert_eq!(response.msg, "");
        let data = response.data.unwrap();
        assert_eq!(data.album, "");
        assert_eq!(data.id, None);
        assert_eq!(data.audio_url, "https://cdn.example/track.mp3");
    }

    #[test]
    fn test_decode_failure_envelope() {
        let response: TrackResponse =
            serde_json::from_str(r#"{"code":404,"msg":"未找到歌曲"}"#).unwrap();
        assert_eq!(response.code, 404);
        assert_eq!(response.msg, "未找到歌曲");
        assert!(response.data.is_none());
    }

    #[test]
    fn test_decode_rejects_wrong_shape() {
        assert!(serde_json::from_str::<TrackResponse>(r#"{"msg":"no code"}"#).is_err());
        assert!(serde_json::from_str::<TrackResponse>(r#""oops""#).is_err());
    }
}
