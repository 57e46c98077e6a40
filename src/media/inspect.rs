//! Media inspection: the collaborator that turns source locations into [`Clip`] metadata.
//!
//! The engine never opens media itself. Callers hand it an inspector; whatever the inspector
//! reports as a failure surfaces as [`crate::MontageError::InspectionFailure`] and is not retried.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::Context as _;

use crate::{
    foundation::core::{Affine, Size},
    foundation::time::MediaTime,
    media::clip::{Clip, rotation_transform},
};

/// Supplies per-clip metadata for a source location.
pub trait MediaInspector {
    /// Inspect one source. Errors are reported to the caller as inspection failures.
    fn inspect(&self, source: &str) -> anyhow::Result<Clip>;
}

impl<F> MediaInspector for F
where
    F: Fn(&str) -> anyhow::Result<Clip>,
{
    fn inspect(&self, source: &str) -> anyhow::Result<Clip> {
        self(source)
    }
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
/// Pre-probed metadata for one source, as stored in a manifest.
pub struct ClipMetadata {
    /// Playable duration.
    pub duration: MediaTime,
    /// Encoded pixel size.
    pub natural_size: Size,
    /// Whether the source carries audio.
    #[serde(default)]
    pub has_audio: bool,
    /// Explicit orientation transform. Takes precedence over `rotation`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_transform: Option<Affine>,
    /// Clockwise display rotation in degrees (multiple of 90).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<i32>,
}

impl ClipMetadata {
    fn to_clip(&self, source: &str) -> anyhow::Result<Clip> {
        let preferred_transform = match (self.preferred_transform, self.rotation) {
            (Some(t), _) => t,
            (None, Some(deg)) => rotation_transform(deg, self.natural_size)?,
            (None, None) => Affine::IDENTITY,
        };
        Ok(Clip::new(source, self.duration, self.natural_size, self.has_audio)
            .with_preferred_transform(preferred_transform))
    }
}

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
/// Inspector backed by a metadata table keyed by source location.
pub struct ManifestInspector {
    entries: BTreeMap<String, ClipMetadata>,
}

impl ManifestInspector {
    /// Empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) metadata for `source`.
    pub fn insert(&mut self, source: impl Into<String>, meta: ClipMetadata) {
        self.entries.insert(source.into(), meta);
    }

    /// Number of known sources.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` when no sources are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Parse a `{ "<source>": ClipMetadata, ... }` JSON table.
    pub fn from_reader<R: std::io::Read>(r: R) -> anyhow::Result<Self> {
        serde_json::from_reader(r).context("parse clip metadata JSON")
    }

    /// Parse a metadata table from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let f =
            File::open(path).with_context(|| format!("open clip metadata '{}'", path.display()))?;
        Self::from_reader(BufReader::new(f))
    }
}

impl MediaInspector for ManifestInspector {
    fn inspect(&self, source: &str) -> anyhow::Result<Clip> {
        let meta = self
            .entries
            .get(source)
            .with_context(|| format!("no metadata recorded for '{source}'"))?;
        meta.to_clip(source)
    }
}

/// Inspector that probes files with the system `ffprobe` binary.
#[derive(Clone, Copy, Debug, Default)]
pub struct FfprobeInspector;

#[cfg(feature = "media-ffmpeg")]
impl MediaInspector for FfprobeInspector {
    fn inspect(&self, source: &str) -> anyhow::Result<Clip> {
        #[derive(serde::Deserialize)]
        struct SideData {
            rotation: Option<f64>,
        }
        #[derive(serde::Deserialize)]
        struct ProbeStream {
            codec_type: Option<String>,
            width: Option<u32>,
            height: Option<u32>,
            duration_ts: Option<i64>,
            time_base: Option<String>,
            duration: Option<String>,
            #[serde(default)]
            side_data_list: Vec<SideData>,
            #[serde(default)]
            tags: BTreeMap<String, String>,
        }
        #[derive(serde::Deserialize)]
        struct ProbeFormat {
            duration: Option<String>,
        }
        #[derive(serde::Deserialize)]
        struct ProbeOut {
            streams: Vec<ProbeStream>,
            format: Option<ProbeFormat>,
        }

        let out = std::process::Command::new("ffprobe")
            .args([
                "-v",
                "error",
                "-print_format",
                "json",
                "-show_streams",
                "-show_format",
            ])
            .arg(source)
            .output()
            .context("failed to run ffprobe")?;
        if !out.status.success() {
            anyhow::bail!(
                "ffprobe failed: {}",
                String::from_utf8_lossy(&out.stderr).trim()
            );
        }

        let parsed: ProbeOut =
            serde_json::from_slice(&out.stdout).context("ffprobe json parse failed")?;
        let video = parsed
            .streams
            .iter()
            .find(|s| s.codec_type.as_deref() == Some("video"))
            .context("no video stream found")?;
        let width = video.width.context("missing video width from ffprobe")?;
        let height = video.height.context("missing video height from ffprobe")?;
        let natural_size = Size::new(f64::from(width), f64::from(height));

        let duration = match (video.duration_ts, video.time_base.as_deref()) {
            (Some(ts), Some(tb)) => duration_from_time_base(ts, tb)?,
            _ => {
                let secs = video
                    .duration
                    .as_deref()
                    .or(parsed.format.as_ref().and_then(|f| f.duration.as_deref()))
                    .context("missing duration from ffprobe")?;
                parse_decimal_secs(secs)?
            }
        };

        // Display-matrix rotation is counter-clockwise; the legacy `rotate` tag is clockwise.
        let rotation = if let Some(r) = video.side_data_list.iter().find_map(|d| d.rotation) {
            -(r.round() as i32)
        } else if let Some(r) = video.tags.get("rotate") {
            r.trim()
                .parse::<i32>()
                .with_context(|| format!("invalid rotate tag '{r}'"))?
        } else {
            0
        };

        let has_audio = parsed
            .streams
            .iter()
            .any(|s| s.codec_type.as_deref() == Some("audio"));

        Ok(Clip::new(source, duration, natural_size, has_audio)
            .with_preferred_transform(rotation_transform(rotation, natural_size)?))
    }
}

#[cfg(not(feature = "media-ffmpeg"))]
impl MediaInspector for FfprobeInspector {
    fn inspect(&self, _source: &str) -> anyhow::Result<Clip> {
        anyhow::bail!("probing media files requires the 'media-ffmpeg' feature")
    }
}

/// `duration_ts` in units of an ffprobe `num/den` time base.
#[cfg_attr(not(feature = "media-ffmpeg"), allow(dead_code))]
pub(crate) fn duration_from_time_base(
    duration_ts: i64,
    time_base: &str,
) -> anyhow::Result<MediaTime> {
    let (num, den) = time_base
        .split_once('/')
        .with_context(|| format!("invalid time_base '{time_base}'"))?;
    let num: i64 = num.trim().parse().context("invalid time_base numerator")?;
    let den: i32 = den.trim().parse().context("invalid time_base denominator")?;
    let value = duration_ts
        .checked_mul(num)
        .context("duration overflows 64-bit time value")?;
    Ok(MediaTime::new(value, den)?.reduced())
}

/// Exact decimal seconds (`"5.005000"`) as a rational time.
#[cfg_attr(not(feature = "media-ffmpeg"), allow(dead_code))]
pub(crate) fn parse_decimal_secs(s: &str) -> anyhow::Result<MediaTime> {
    let s = s.trim();
    let (whole, frac) = s.split_once('.').unwrap_or((s, ""));
    let frac = frac.trim_end_matches('0');
    anyhow::ensure!(
        !whole.is_empty() && whole.bytes().all(|b| b.is_ascii_digit()),
        "invalid duration '{s}'"
    );
    anyhow::ensure!(
        frac.len() <= 9 && frac.bytes().all(|b| b.is_ascii_digit()),
        "invalid duration '{s}'"
    );

    let timescale = 10i32.pow(frac.len() as u32);
    let whole: i64 = whole.parse().with_context(|| format!("invalid duration '{s}'"))?;
    let frac_v: i64 = if frac.is_empty() { 0 } else { frac.parse()? };
    let value = whole
        .checked_mul(i64::from(timescale))
        .and_then(|v| v.checked_add(frac_v))
        .with_context(|| format!("duration '{s}' out of range"))?;
    Ok(MediaTime::new(value, timescale)?.reduced())
}

#[cfg(test)]
#[path = "../../tests/unit/media/inspect.rs"]
mod tests;
