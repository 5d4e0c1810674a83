// Unit tests for planning rules

use std::path::PathBuf;

use super::*;

fn probe_with(rate: (i64, i64), total_frames: Option<u64>, audio_tracks: usize) -> MediaProbe {
    let video = VideoStreamInfo::new(
        0,
        "h264".to_string(),
        FrameRate::new(rate.0, rate.1).unwrap(),
        total_frames,
    );
    let audio = (0..audio_tracks)
        .map(|i| AudioStreamInfo::new(i + 1, "aac".to_string()))
        .collect();
    MediaProbe::new(vec![video], audio).unwrap()
}

fn ntsc_probe() -> MediaProbe {
    probe_with((30000, 1001), Some(300), 2)
}

#[test]
fn test_frame_range_accepts_bounds_inside_video() {
    let probe = ntsc_probe();
    assert!(ClipPlanner::validate_frame_range(&probe, Some(0), Some(300)).is_ok());
    assert!(ClipPlanner::validate_frame_range(&probe, Some(30), None).is_ok());
    assert!(ClipPlanner::validate_frame_range(&probe, None, Some(1)).is_ok());
    assert!(ClipPlanner::validate_frame_range(&probe, None, None).is_ok());
}

#[test]
fn test_frame_range_rejects_negative_and_past_end() {
    let probe = ntsc_probe();
    assert_eq!(
        ClipPlanner::validate_frame_range(&probe, Some(-1), None),
        Err(DomainError::FrameOutOfBounds {
            which: FrameBound::Start,
            frame: -1,
            total_frames: 300,
        })
    );
    assert_eq!(
        ClipPlanner::validate_frame_range(&probe, None, Some(301)),
        Err(DomainError::FrameOutOfBounds {
            which: FrameBound::End,
            frame: 301,
            total_frames: 300,
        })
    );
}

#[test]
fn test_frame_range_rejects_start_not_before_end() {
    let probe = ntsc_probe();
    assert_eq!(
        ClipPlanner::validate_frame_range(&probe, Some(90), Some(30)),
        Err(DomainError::InvalidRange { start: 90, end: 30 })
    );
    assert_eq!(
        ClipPlanner::validate_frame_range(&probe, Some(30), Some(30)),
        Err(DomainError::InvalidRange { start: 30, end: 30 })
    );
}

#[test]
fn test_frame_range_needs_frame_count() {
    let probe = probe_with((25, 1), None, 0);
    let err = ClipPlanner::validate_frame_range(&probe, Some(1), None).unwrap_err();
    assert!(matches!(err, DomainError::Probe { .. }));
    // Without bounds the missing count does not matter
    assert!(ClipPlanner::validate_frame_range(&probe, None, None).is_ok());
}

#[test]
fn test_frame_range_needs_video_stream() {
    let probe = MediaProbe::new(vec![], vec![AudioStreamInfo::new(0, "flac".to_string())]).unwrap();
    let err = ClipPlanner::validate_frame_range(&probe, None, Some(10)).unwrap_err();
    assert!(matches!(err, DomainError::Probe { .. }));
    assert!(ClipPlanner::validate_frame_range(&probe, None, None).is_ok());
}

#[test]
fn test_audio_selection_bounds() {
    let probe = ntsc_probe();
    assert!(ClipPlanner::validate_audio_selection(&probe, None).is_ok());
    assert!(ClipPlanner::validate_audio_selection(&probe, Some(&[0, 1][..])).is_ok());
    assert!(ClipPlanner::validate_audio_selection(&probe, Some(&[1, 1][..])).is_ok());

    // Index equal to the track count is one past the end
    assert_eq!(
        ClipPlanner::validate_audio_selection(&probe, Some(&[0, 2][..])),
        Err(DomainError::AudioTrackOutOfRange {
            track: 2,
            available: 2,
        })
    );
    assert_eq!(
        ClipPlanner::validate_audio_selection(&probe, Some(&[-1][..])),
        Err(DomainError::AudioTrackOutOfRange {
            track: -1,
            available: 2,
        })
    );
}

#[test]
fn test_audio_selection_on_file_without_audio() {
    let probe = probe_with((25, 1), Some(10), 0);
    assert!(ClipPlanner::validate_audio_selection(&probe, Some(&[0][..])).is_err());
}

#[test]
fn test_time_window_ntsc_scenario() {
    let probe = ntsc_probe();
    let window = ClipPlanner::compute_time_window(&probe, Some(30), Some(90)).unwrap();
    assert_eq!(window.start, Some(Rational64::new(1001, 1000)));
    // 60 * 1001 / 30000 = 2.002 exactly
    assert_eq!(window.duration, Some(Rational64::new(1001, 500)));
    assert_eq!(window.duration.map(seconds_to_f64), Some(2.002));
}

#[test]
fn test_time_window_duration_is_frame_difference() {
    let rates = [(24000, 1001), (30000, 1001), (25, 1), (120, 1)];
    for (num, den) in rates {
        let probe = probe_with((num, den), Some(100_000), 0);
        let rate = FrameRate::new(num, den).unwrap();
        for (start, end) in [(0i64, 1i64), (7, 13), (1000, 99_999), (12_345, 54_321)] {
            let window = ClipPlanner::compute_time_window(&probe, Some(start), Some(end)).unwrap();
            assert_eq!(window.duration, rate.frame_to_seconds(end - start));
        }
    }
}

#[test]
fn test_time_window_single_bounds() {
    let probe = probe_with((25, 1), Some(1000), 0);

    let window = ClipPlanner::compute_time_window(&probe, Some(50), None).unwrap();
    assert_eq!(window.start, Some(Rational64::from_integer(2)));
    assert_eq!(window.duration, None);

    let window = ClipPlanner::compute_time_window(&probe, None, Some(75)).unwrap();
    assert_eq!(window.start, None);
    assert_eq!(window.duration, Some(Rational64::from_integer(3)));

    let window = ClipPlanner::compute_time_window(&probe, None, None).unwrap();
    assert_eq!(window, TimeWindow::default());
}

#[test]
fn test_time_window_overflow_is_probe_error() {
    let probe = probe_with((1, i64::MAX), Some(u64::MAX), 0);
    let err = ClipPlanner::compute_time_window(&probe, Some(2), Some(3)).unwrap_err();
    assert!(matches!(err, DomainError::Probe { .. }));
}

#[test]
fn test_plan_without_video_stream() {
    let probe = MediaProbe::new(vec![], vec![AudioStreamInfo::new(0, "flac".to_string())]).unwrap();
    let request = ClipRequest::new("song.flac").with_copy_video(true);
    let plan = ClipPlanner::default().plan(&request, &probe).unwrap();
    assert_eq!(plan.video, VideoHandling::Absent);
    assert_eq!(plan.audio, AudioHandling::CopyAll);
}

#[test]
fn test_plan_without_audio_selection_copies_all() {
    let probe = ntsc_probe();
    let planner = ClipPlanner::default();
    for no_loudnorm in [false, true] {
        let request = ClipRequest::new("movie.mkv").with_no_loudnorm(no_loudnorm);
        let plan = planner.plan(&request, &probe).unwrap();
        assert_eq!(plan.audio, AudioHandling::CopyAll);
    }
}

#[test]
fn test_plan_mixes_selected_tracks_with_loudnorm() {
    let probe = ntsc_probe();
    let request = ClipRequest::new("movie.mkv")
        .with_frames(Some(30), Some(90))
        .with_audio_tracks(vec![0, 1]);
    let plan = ClipPlanner::default().plan(&request, &probe).unwrap();

    assert_eq!(
        plan.audio,
        AudioHandling::Mix {
            tracks: vec![0, 1],
            codec: "aac".to_string(),
            loudnorm: true,
        }
    );
    assert_eq!(plan.video, VideoHandling::Reencode);
    assert_eq!(plan.start_seconds, Some(1.001));
    assert_eq!(plan.duration_seconds, Some(2.002));
    assert_eq!(plan.output, PathBuf::from("movie.converted.mkv"));
}

#[test]
fn test_plan_respects_flags_and_output() {
    let probe = ntsc_probe();
    let request = ClipRequest::new("movie.mkv")
        .with_audio_tracks(vec![1])
        .with_no_loudnorm(true)
        .with_copy_video(true)
        .with_output("clip.mp4");
    let plan = ClipPlanner::new("libopus").plan(&request, &probe).unwrap();

    assert_eq!(plan.video, VideoHandling::Copy);
    assert_eq!(
        plan.audio,
        AudioHandling::Mix {
            tracks: vec![1],
            codec: "libopus".to_string(),
            loudnorm: false,
        }
    );
    assert_eq!(plan.output, PathBuf::from("clip.mp4"));
    assert_eq!(plan.start_seconds, None);
    assert_eq!(plan.duration_seconds, None);
}

#[test]
fn test_plan_stops_at_first_validation_failure() {
    let probe = ntsc_probe();
    let request = ClipRequest::new("movie.mkv")
        .with_frames(Some(90), Some(30))
        .with_audio_tracks(vec![5]);
    let err = ClipPlanner::default().plan(&request, &probe).unwrap_err();
    assert_eq!(err, DomainError::InvalidRange { start: 90, end: 30 });
}
