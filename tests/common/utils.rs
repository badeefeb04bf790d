use goal_resolver::snapshot::snapshot_model::Snapshot;

pub fn fixture_path(name: &str) -> String {
    let base = std::env::current_dir().unwrap();
    let path = base.join("tests").join("fixtures").join(name);

    path.display().to_string()
}

pub fn fixture(name: &str) -> String {
    std::fs::read_to_string(fixture_path(name)).unwrap()
}

pub fn fixture_snapshot(name: &str) -> Snapshot {
    Snapshot::build(&fixture(name), name).unwrap()
}

pub fn snapshot_of(html: &str) -> Snapshot {
    Snapshot::build(html, "test://fixture").unwrap()
}
