use std::collections::BTreeMap;
use std::time::Duration;

use m3u_filter::config::{AffixStrip, RenameTarget, ReorderRule, RuleConfig, StripConfig};
use m3u_filter::errors::{AppError, SourceError};
use m3u_filter::pipeline::{process_playlist, transform_playlist, PlaylistPipeline, PlaylistSource};

fn set(items: &[&str]) -> std::collections::BTreeSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Rules with a "-main" naming convention on both group titles and names
fn region_rules() -> RuleConfig {
    let mut renames = BTreeMap::new();
    renames.insert(
        "news-special-main".to_string(),
        RenameTarget {
            name: "news-13".to_string(),
            tvg_id: "N13".to_string(),
            tvg_name: "News 13".to_string(),
        },
    );

    RuleConfig {
        allowed_groups: set(&["region-main", "region-other-main"]),
        designated_group: "region-main".to_string(),
        denied_names: set(&["CH-3-main"]),
        renames,
        reorder: ReorderRule::disabled(),
        strip: StripConfig {
            group_title: AffixStrip {
                prefix: String::new(),
                suffix: "-main".to_string(),
            },
            display_name: AffixStrip {
                prefix: String::new(),
                suffix: "-main".to_string(),
            },
        },
    }
}

const REGION_PLAYLIST: &str = r#"#EXTM3U
#EXTINF:-1 tvg-id="X" tvg-name="X" group-title="region-other-main",X-main
http://example.com/x.m3u8
#EXTINF:-1 tvg-id="CH3" tvg-name="CH3" group-title="region-main",CH-3-main
http://example.com/ch3.m3u8
#EXTINF:-1 tvg-id="NS" tvg-name="NS" group-title="region-main",news-special-main
http://example.com/ns.m3u8
#EXTINF:-1 tvg-id="Z" group-title="elsewhere",Z-main
http://example.com/z.m3u8
"#;

#[test]
fn test_end_to_end_scenario() {
    let output = transform_playlist(REGION_PLAYLIST, &region_rules());

    assert_eq!(
        output,
        "#EXTM3U\n\
         #EXTINF:-1 tvg-id=\"N13\" tvg-name=\"News 13\" group-title=\"region\",news-13\n\
         http://example.com/ns.m3u8\n\
         #EXTINF:-1 tvg-id=\"X\" tvg-name=\"X\" group-title=\"region-other\",X\n\
         http://example.com/x.m3u8\n"
    );
}

#[test]
fn test_stats_account_for_every_stage() {
    let processed = process_playlist(REGION_PLAYLIST, &region_rules());

    assert_eq!(processed.parse_stats.records, 4);
    assert_eq!(processed.filtered, 2);
    assert_eq!(processed.mapping_stats.designated, 1);
    assert_eq!(processed.mapping_stats.renamed, 1);
    assert_eq!(processed.mapping_stats.stripped, 2);
    assert_eq!(processed.records.len(), 2);
}

#[test]
fn test_output_is_deterministic_and_stable() {
    let rules = region_rules();
    let first = transform_playlist(REGION_PLAYLIST, &rules);
    let second = transform_playlist(REGION_PLAYLIST, &rules);
    assert_eq!(first, second);

    // Running the output through again changes nothing: every rule has
    // already been applied and the naming tokens are gone
    let rerun = transform_playlist(
        &first,
        &RuleConfig {
            allowed_groups: set(&["region", "region-other"]),
            designated_group: "region".to_string(),
            ..rules
        },
    );
    assert_eq!(rerun, first);
}

#[test]
fn test_default_rules_curate_the_builtin_lineup() {
    let input = r#"#EXTM3U x-tvg-url="http://epg.example.com/e.xml.gz"
#EXTINF:-1 tvg-id="CCTV1" tvg-name="CCTV1" group-title="主力-央视",CCTV-1HD-主力
http://example.com/cctv1
#EXTINF:-1 tvg-id="CCTV3" tvg-name="CCTV3" group-title="主力-央视",CCTV-3-主力
http://example.com/cctv3-sd
#EXTINF:-1 tvg-id="CCTV5+" tvg-name="CCTV5+" group-title="主力-央视",CCTV-5+HD-主力
http://example.com/cctv5plus
#EXTINF:-1 tvg-id="HNWS" tvg-name="湖南卫视" group-title="主力-卫视",湖南卫视HD-主力
http://example.com/hunan
#EXTINF:-1 tvg-id="CCTV5" tvg-name="CCTV5" group-title="主力-央视",CCTV-5HD-主力
http://example.com/cctv5
#EXTINF:-1 tvg-id="CCTVXW" tvg-name="CCTV新闻" group-title="主力-央视",CCTV-新闻HD-主力
http://example.com/cctv13
#EXTINF:-1 tvg-id="CCTV1" tvg-name="CCTV1" group-title="备用-央视",CCTV-1HD-备用
http://example.com/backup-cctv1
#EXTINF:-1 tvg-id="CCTV6" group-title="主力-央视",CCTV-6-主力
#EXTINF:-1 tvg-id="SZWS" tvg-name="深圳卫视" group-title="主力-卫视",CCTV-3-主力
http://example.com/not-really-cctv3
"#;

    let output = transform_playlist(input, &RuleConfig::default());
    let lines: Vec<&str> = output.lines().collect();

    assert_eq!(
        lines,
        vec![
            "#EXTM3U",
            "#EXTINF:-1 tvg-id=\"CCTV1\" tvg-name=\"CCTV1\" group-title=\"央视\",CCTV-1HD",
            "http://example.com/cctv1",
            "#EXTINF:-1 tvg-id=\"CCTV5\" tvg-name=\"CCTV5\" group-title=\"央视\",CCTV-5HD",
            "http://example.com/cctv5",
            "#EXTINF:-1 tvg-id=\"CCTV5+\" tvg-name=\"CCTV5+\" group-title=\"央视\",CCTV-5+HD",
            "http://example.com/cctv5plus",
            "#EXTINF:-1 tvg-id=\"CCTV13\" tvg-name=\"CCTV13\" group-title=\"央视\",CCTV-13HD",
            "http://example.com/cctv13",
            "#EXTINF:-1 tvg-id=\"HNWS\" tvg-name=\"湖南卫视\" group-title=\"卫视\",湖南卫视HD",
            "http://example.com/hunan",
            // Denylist only applies inside the designated group
            "#EXTINF:-1 tvg-id=\"SZWS\" tvg-name=\"深圳卫视\" group-title=\"卫视\",CCTV-3",
            "http://example.com/not-really-cctv3",
        ]
    );
}

#[test]
fn test_reorder_rule_in_pipeline() {
    let rules = RuleConfig {
        reorder: ReorderRule::new("anchor", "target"),
        strip: StripConfig::default(),
        ..region_rules()
    };
    let input = "#EXTM3U
#EXTINF:-1 group-title=\"region-main\",X
http://a/x
#EXTINF:-1 group-title=\"region-main\",target
http://a/t
#EXTINF:-1 group-title=\"region-main\",anchor
http://a/a
#EXTINF:-1 group-title=\"region-main\",Y
http://a/y
";
    let names: Vec<String> = process_playlist(input, &rules)
        .records
        .iter()
        .map(|r| r.display_name().to_string())
        .collect();
    assert_eq!(names, vec!["X", "anchor", "target", "Y"]);
}

#[tokio::test]
async fn test_pipeline_run_from_file_writes_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("source.m3u");
    let output = dir.path().join("live.m3u");
    std::fs::write(&input, REGION_PLAYLIST).unwrap();

    let pipeline = PlaylistPipeline::new(PlaylistSource::File(input), output.clone(), region_rules());
    let outcome = pipeline.run().await.unwrap();

    assert_eq!(outcome.channel_count, 2);
    assert_eq!(outcome.output_path, output);
    assert_eq!(
        std::fs::read_to_string(&output).unwrap(),
        transform_playlist(REGION_PLAYLIST, &region_rules())
    );
}

#[tokio::test]
async fn test_retrieval_failure_leaves_previous_output_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("live.m3u");
    std::fs::write(&output, "#EXTM3U\nprevious\n").unwrap();

    let pipeline = PlaylistPipeline::new(
        PlaylistSource::Remote {
            url: "http://127.0.0.1:1/iptv.m3u".to_string(),
            timeout: Duration::from_secs(5),
        },
        output.clone(),
        region_rules(),
    );
    let err = pipeline.run().await.unwrap_err();

    assert!(matches!(err, AppError::Source(_)));
    assert_eq!(
        std::fs::read_to_string(&output).unwrap(),
        "#EXTM3U\nprevious\n"
    );
}

#[tokio::test]
async fn test_missing_input_file_is_retrieval_failure() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("live.m3u");

    let pipeline = PlaylistPipeline::new(
        PlaylistSource::File(dir.path().join("nope.m3u")),
        output.clone(),
        region_rules(),
    );
    let err = pipeline.run().await.unwrap_err();

    assert!(matches!(err, AppError::Source(SourceError::Read { .. })));
    assert!(!output.exists());
}

#[test]
fn test_rewritten_descriptor_keeps_unrecognized_head_text() {
    let input = "#EXTM3U
#EXTINF:-1 tvg-id=\"CCTV1\" group-title=\"主力-央视\" radio,CCTV-1HD-主力
http://example.com/cctv1
#EXTINF:-1 group-title=\"主力-卫视\",湖南卫视, 频道HD-主力
http://example.com/hunan
";
    let output = transform_playlist(input, &RuleConfig::default());

    assert_eq!(
        output,
        "#EXTM3U\n\
         #EXTINF:-1 tvg-id=\"CCTV1\" group-title=\"央视\" radio,CCTV-1HD\n\
         http://example.com/cctv1\n\
         #EXTINF:-1 group-title=\"卫视\",湖南卫视,频道HD\n\
         http://example.com/hunan\n"
    );
}
