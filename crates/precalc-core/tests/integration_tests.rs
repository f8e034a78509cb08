//! Integration tests for precalc-core
//!
//! These tests run the whole pipeline: discovery, combination building, the
//! batch driver and the CSV sink, against beatmaps on disk.

use std::fs;
use std::path::Path;

use precalc_core::scoring::MockBackend;
use precalc_core::{
    BatchDriver, Config, CsvSink, FailurePolicy, GameMod, GameMode, OsuStandard, OutputRow,
    RosuBackend, RowSink, RulesetProvider, discover_beatmaps, read_rows,
};
use tempfile::TempDir;

fn beatmap(mode: u8, beatmap_id: Option<i32>) -> String {
    let id_line = beatmap_id
        .map(|id| format!("BeatmapID:{}\n", id))
        .unwrap_or_default();

    format!(
        "osu file format v14

[General]
AudioFilename: audio.mp3
Mode: {mode}

[Metadata]
Title:Integration
Artist:Test
Version:Insane
{id_line}BeatmapSetID:1

[Difficulty]
HPDrainRate:5
CircleSize:4
OverallDifficulty:8
ApproachRate:9
SliderMultiplier:1.4
SliderTickRate:1

[TimingPoints]
0,300,4,2,0,100,1,0

[HitObjects]
256,192,1000,1,0,0:0:0:0:
100,100,1300,1,0,0:0:0:0:
400,300,1600,1,0,0:0:0:0:
256,192,1900,1,0,0:0:0:0:
"
    )
}

fn write_maps(root: &Path) {
    fs::create_dir_all(root.join("set_a")).unwrap();
    fs::create_dir_all(root.join("set_b")).unwrap();
    fs::write(root.join("set_a").join("std.osu"), beatmap(0, Some(100))).unwrap();
    fs::write(root.join("set_a").join("taiko.osu"), beatmap(1, Some(200))).unwrap();
    fs::write(root.join("set_b").join("no_id.osu"), beatmap(0, None)).unwrap();
    fs::write(root.join("set_b").join("notes.txt"), "not a map").unwrap();
}

mod rosu_pipeline_tests {
    use super::*;

    #[test]
    fn test_full_run_writes_expected_rows() {
        let temp = TempDir::new().unwrap();
        let maps = temp.path().join("maps");
        write_maps(&maps);
        let output = temp.path().join("out.csv");

        let config = Config::default();
        let combos = config.combinations(&OsuStandard);
        let files = discover_beatmaps(&maps, &config.extension).unwrap();
        assert_eq!(files.len(), 3);

        let driver = BatchDriver::for_ruleset(&OsuStandard);
        let mut sink =
            CsvSink::create(&output, &OsuStandard.tracked(), config.buffer_size).unwrap();

        let summary = driver
            .run(
                &files,
                &combos,
                &RosuBackend::new(config.accuracy),
                &mut sink,
            )
            .unwrap();
        drop(sink);

        assert_eq!(summary.files_processed, 2);
        assert_eq!(summary.files_skipped, 1);
        assert_eq!(summary.rows_written, 2 * combos.len());

        let content = fs::read_to_string(&output).unwrap();
        assert!(content.starts_with("BeatmapId,HR,EZ,FL,DT,HT,HD,LazerSR,LazerPP\n"));

        let rows = read_rows(content.as_bytes()).unwrap();
        assert_eq!(rows.len(), 2 * combos.len());

        // set_a/std.osu comes first, the taiko map has no rows, then set_b/no_id.osu
        let ids: Vec<_> = rows.iter().map(|r| r.beatmap_id).collect();
        let mut expected_ids = vec![100; combos.len()];
        expected_ids.extend(vec![-1; combos.len()]);
        assert_eq!(ids, expected_ids);

        for (row, mods) in rows.iter().zip(combos.iter().cycle()) {
            assert_eq!(
                row.flag(GameMod::HardRock),
                Some(mods.contains(GameMod::HardRock))
            );
            assert_eq!(
                row.flag(GameMod::DoubleTime),
                Some(mods.contains(GameMod::DoubleTime))
            );
            assert_eq!(row.flag(GameMod::Easy), Some(false));
            assert!(row.stars.is_finite());
            assert!(row.pp.is_finite());
        }
    }
}

mod mock_pipeline_tests {
    use super::*;

    #[test]
    fn test_rows_follow_file_then_combination_order() {
        let temp = TempDir::new().unwrap();
        write_maps(temp.path());
        let files = discover_beatmaps(temp.path(), "osu").unwrap();

        let backend = MockBackend::new()
            .with_map(&files[0], 1, GameMode::Osu, 1.0)
            .with_map(&files[1], 2, GameMode::Mania, 2.0)
            .with_map(&files[2], 3, GameMode::Osu, 3.0);

        let mut config = Config::default();
        config.allow(&[GameMod::Hidden]);
        let combos = config.combinations(&OsuStandard);
        assert_eq!(combos.len(), 8);

        let mut rows: Vec<OutputRow> = Vec::new();
        BatchDriver::for_ruleset(&OsuStandard)
            .run(&files, &combos, &backend, &mut rows)
            .unwrap();

        let expected: Vec<_> = [(1, 1.0), (3, 3.0)]
            .iter()
            .flat_map(|&(id, base)| {
                combos
                    .iter()
                    .map(move |mods| (id, MockBackend::expected(base, mods).stars))
            })
            .collect();
        let actual: Vec<_> = rows.iter().map(|r| (r.beatmap_id, r.stars)).collect();
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_abort_keeps_rows_written_before_failure() {
        let temp = TempDir::new().unwrap();
        write_maps(temp.path());
        let files = discover_beatmaps(temp.path(), "osu").unwrap();
        let combos = Config::default().combinations(&OsuStandard);

        let backend = MockBackend::new()
            .with_map(&files[0], 1, GameMode::Osu, 1.0)
            .with_map(&files[1], 2, GameMode::Osu, 2.0)
            .with_map(&files[2], 3, GameMode::Osu, 3.0)
            .failing_calculation(&files[1], combos[2].clone());

        let output = temp.path().join("out.csv");
        let mut sink = CsvSink::create(&output, &OsuStandard.tracked(), 64).unwrap();
        let result =
            BatchDriver::for_ruleset(&OsuStandard).run(&files, &combos, &backend, &mut sink);
        assert!(result.is_err());
        assert_eq!(sink.rows_written(), combos.len() + 2);
        drop(sink);

        let rows = read_rows(fs::read_to_string(&output).unwrap().as_bytes()).unwrap();
        assert_eq!(rows.len(), combos.len() + 2);
        assert!(rows.iter().all(|r| r.beatmap_id != 3));
    }

    #[test]
    fn test_skip_file_policy_continues() {
        let temp = TempDir::new().unwrap();
        write_maps(temp.path());
        let files = discover_beatmaps(temp.path(), "osu").unwrap();
        let combos = Config::default().combinations(&OsuStandard);

        let backend = MockBackend::new()
            .failing_load(&files[0])
            .with_map(&files[1], 2, GameMode::Osu, 2.0)
            .with_map(&files[2], 3, GameMode::Osu, 3.0);

        let mut rows: Vec<OutputRow> = Vec::new();
        let summary = BatchDriver::for_ruleset(&OsuStandard)
            .with_policy(FailurePolicy::SkipFile)
            .run(&files, &combos, &backend, &mut rows)
            .unwrap();
        RowSink::flush(&mut rows).unwrap();

        assert_eq!(summary.files_failed, 1);
        assert_eq!(summary.files_processed, 2);
        assert_eq!(rows.len(), 2 * combos.len());
    }

    #[test]
    fn test_missing_output_directory_is_fatal() {
        let temp = TempDir::new().unwrap();
        let result = CsvSink::create(
            temp.path().join("no").join("such").join("out.csv"),
            &[GameMod::HardRock],
            64,
        );
        assert!(result.is_err());
    }
}
