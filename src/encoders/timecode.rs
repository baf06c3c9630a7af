//! Timestamp grammars of the output formats. All inputs are milliseconds
//! from the start of the track unless stated otherwise.

/// `HH:MM:SS.mmm`, used by WebVTT and TTML
pub fn clock_millis(ms: u64) -> String {
    let hours = ms / 3_600_000;
    let minutes = (ms % 3_600_000) / 60_000;
    let seconds = (ms % 60_000) / 1_000;
    let millis = ms % 1_000;

    format!("{:02}:{:02}:{:02}.{:03}", hours, minutes, seconds, millis)
}

/// `H:MM:SS.mmm` with an unpadded hour, used by SBV
pub fn sbv_time(ms: u64) -> String {
    let hours = ms / 3_600_000;
    let minutes = (ms % 3_600_000) / 60_000;
    let seconds = (ms % 60_000) / 1_000;
    let millis = ms % 1_000;

    format!("{}:{:02}:{:02}.{:03}", hours, minutes, seconds, millis)
}

/// `HH:MM:SS` with fractions dropped, used by TMPlayer
pub fn clock_seconds(ms: u64) -> String {
    let hours = ms / 3_600_000;
    let minutes = (ms % 3_600_000) / 60_000;
    let seconds = (ms % 60_000) / 1_000;

    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}

/// Truncated tenths of a second, used by MPL2
pub fn deciseconds(ms: u64) -> u64 {
    ms / 100
}

/// `[mm:ss.xx]` with unbounded minutes, used by LRC.
///
/// Hundredths are rounded half up and carry into seconds and minutes, so
/// 59 995 ms is `[01:00.00]`.
pub fn lrc_tag(ms: u64) -> String {
    let total_centis = ms / 10 + u64::from(ms % 10 >= 5);
    let minutes = total_centis / 6_000;
    let seconds = (total_centis % 6_000) / 100;
    let centis = total_centis % 100;

    format!("[{:02}:{:02}.{:02}]", minutes, seconds, centis)
}

/// Non-drop-frame SMPTE timecode `HH:MM:SS:FF` at 29.97 fps.
///
/// Wall-clock time is scaled by 1000/1001 so that frame numbers count
/// NTSC frames.
pub fn scc_timecode(microseconds: f64) -> String {
    let mut seconds = microseconds.max(0.0) / 1001.0 / 1000.0;

    let hours = (seconds / 3600.0).floor();
    seconds -= hours * 3600.0;
    let minutes = (seconds / 60.0).floor();
    seconds -= minutes * 60.0;
    let whole_seconds = seconds.floor();
    seconds -= whole_seconds;
    let frames = (seconds * 30.0).floor();

    format!(
        "{:02}:{:02}:{:02}:{:02}",
        hours as u64, minutes as u64, whole_seconds as u64, frames as u64
    )
}
