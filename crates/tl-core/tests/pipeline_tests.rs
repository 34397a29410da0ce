//! End-to-end tests for the hunting pipeline over a small static intel feed.

use tl_core::{
    assign_threat_scores, map_ttps, search_iocs, AiThreatTable, EnrichedAlert, HuntPipeline,
    IndicatorTable, IntelTables, Severity, SeverityLattice, TechniqueTable, NO_AI_THREAT,
    UNKNOWN_TTP,
};

fn indicator_table() -> IndicatorTable {
    [("192.168.1.1", "Brute Force Attack")].into_iter().collect()
}

fn run_stages(
    alerts: &[EnrichedAlert],
    indicators: &IndicatorTable,
    techniques: &TechniqueTable,
    ai_threats: &AiThreatTable,
) -> Vec<tl_core::ScoredAlert> {
    let matches = search_iocs(alerts, indicators).unwrap();
    let mapped = map_ttps(matches, techniques, ai_threats);
    assign_threat_scores(mapped, &SeverityLattice::default())
}

#[test]
fn scenario_technique_hit_scores_critical() {
    let alerts = vec![EnrichedAlert::new("1", "192.168.1.1")];
    let techniques: TechniqueTable = [("192.168.1.1", "TA0001: Initial Access")]
        .into_iter()
        .collect();
    let ai_threats: AiThreatTable = [("192.168.1.1", "Model Theft: Inversion")]
        .into_iter()
        .collect();

    let scored = run_stages(&alerts, &indicator_table(), &techniques, &ai_threats);
    assert_eq!(scored.len(), 1);
    assert_eq!(scored[0].threat_score, Severity::Critical);
}

#[test]
fn scenario_empty_taxonomies_fall_back_to_sentinels() {
    let alerts = vec![EnrichedAlert::new("1", "192.168.1.1")];
    let scored = run_stages(
        &alerts,
        &indicator_table(),
        &TechniqueTable::new(),
        &AiThreatTable::new(),
    );
    assert_eq!(scored[0].technique, UNKNOWN_TTP);
    assert_eq!(scored[0].ai_threat, NO_AI_THREAT);
    assert_eq!(scored[0].threat_score, Severity::Medium);
}

#[test]
fn scenario_unknown_source_produces_nothing() {
    let alerts = vec![EnrichedAlert::new("1", "10.0.0.9")];
    let scored = run_stages(
        &alerts,
        &indicator_table(),
        &TechniqueTable::new(),
        &AiThreatTable::new(),
    );
    assert!(scored.is_empty());
}

#[test]
fn scenario_empty_alert_list_is_empty_everywhere() {
    let matches = search_iocs(&[], &indicator_table()).unwrap();
    assert!(matches.is_empty());
    let mapped = map_ttps(matches, &TechniqueTable::new(), &AiThreatTable::new());
    assert!(mapped.is_empty());
    let scored = assign_threat_scores(mapped, &SeverityLattice::default());
    assert!(scored.is_empty());
}

#[test]
fn idempotence_bytes_identical_across_runs() {
    let tables = IntelTables {
        indicators: [
            ("192.168.1.1", "Brute Force Attack"),
            ("192.168.1.2", "Credential Stuffing"),
        ]
        .into_iter()
        .collect(),
        techniques: [("192.168.1.1", "TA0001: Initial Access")]
            .into_iter()
            .collect(),
        ai_threats: [("192.168.1.2", "Data Poisoning")].into_iter().collect(),
    };
    let pipeline = HuntPipeline::new(tables);
    let alerts = vec![
        EnrichedAlert::new("1", "192.168.1.1"),
        EnrichedAlert::new("2", "192.168.1.2"),
        EnrichedAlert::new("3", "203.0.113.7"),
    ];

    let first = serde_json::to_vec(&pipeline.run(&alerts).unwrap().results).unwrap();
    let second = serde_json::to_vec(&pipeline.run(&alerts).unwrap().results).unwrap();
    assert_eq!(first, second);
}

#[test]
fn order_follows_input_modulo_filtering() {
    let indicators: IndicatorTable = [
        ("10.0.0.1", "A"),
        ("10.0.0.2", "B"),
        ("10.0.0.3", "C"),
    ]
    .into_iter()
    .collect();
    let alerts = vec![
        EnrichedAlert::new("third", "10.0.0.3"),
        EnrichedAlert::new("miss", "198.51.100.1"),
        EnrichedAlert::new("first", "10.0.0.1"),
        EnrichedAlert::new("second", "10.0.0.2"),
    ];

    let scored = run_stages(
        &alerts,
        &indicators,
        &TechniqueTable::new(),
        &AiThreatTable::new(),
    );
    let ids: Vec<_> = scored.iter().map(|s| s.alert_id.as_str()).collect();
    assert_eq!(ids, vec!["third", "first", "second"]);
}

#[test]
fn severity_monotonic_under_label_raises() {
    let lattice = SeverityLattice::default();
    // Raising one side's mapped severity never lowers the combined score.
    let ladder = [UNKNOWN_TTP, "TA0003: Execution", "TA0001: Initial Access"];
    let mut previous = Severity::Low;
    for technique in ladder {
        let t = lattice.technique_severity(technique);
        let combined = lattice.combine(t, lattice.ai_threat_severity(NO_AI_THREAT));
        assert!(combined >= previous, "score regressed at {technique}");
        previous = combined;
    }
}

#[test]
fn snapshot_round_trip() {
    let dir = std::env::temp_dir().join("threatlens-pipeline-tests");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("scored.json");

    let tables = IntelTables {
        indicators: [("192.168.1.1", "Brute Force Attack")].into_iter().collect(),
        techniques: [("192.168.1.1", "TA0001: Initial Access")]
            .into_iter()
            .collect(),
        ai_threats: AiThreatTable::new(),
    };
    let pipeline = HuntPipeline::new(tables);
    let report = pipeline
        .run(&[EnrichedAlert::new("1", "192.168.1.1")])
        .unwrap();

    report.write_snapshot(&path).unwrap();
    let restored = tl_core::read_snapshot(&path).unwrap();
    assert_eq!(restored, report.results);

    std::fs::remove_file(&path).ok();
}
