// Every published crate carries the workspace license.

use std::fs;
use std::path::Path;

#[test]
fn test_members_inherit_license_file() {
    let root = Path::new(env!("CARGO_MANIFEST_DIR"));
    let workspace = fs::read_to_string(root.join("Cargo.toml")).unwrap();
    assert!(workspace.contains("license-file = \"LICENSE\""));
    assert!(root.join("LICENSE").is_file());

    for entry in fs::read_dir(root.join("crates")).unwrap() {
        let manifest = entry.unwrap().path().join("Cargo.toml");
        let text = fs::read_to_string(&manifest).unwrap();
        assert!(
            text.contains("license-file.workspace = true"),
            "{} does not inherit the license",
            manifest.display()
        );
    }
}
