//! Tests patch rewriting templates in place, its options, and its failure modes.

use super::*;

fn args_for(target: &Path) -> PatchArgs {
    PatchArgs {
        target: Some(target.to_path_buf()),
        // keep a stray ejsfix.toml in the test runner's cwd out of the picture
        config: Some(target.with_file_name("ejsfix.toml")),
        ..Default::default()
    }
}

fn empty_config(target: &Path) {
    write(&target.with_file_name("ejsfix.toml"), "");
}

#[test]
/// Tests the split 'over budget' tag is joined and nothing else moves.
fn test_patch_joins_over_budget() {
    let dir = tempdir().unwrap();
    let target = dir.path().join("dashboard.ejs");
    write(&target, BROKEN_DASHBOARD);
    empty_config(&target);

    patch::execute(args_for(&target)).unwrap();

    assert_eq!(fs::read_to_string(&target).unwrap(), fixed_dashboard());
}

#[test]
/// Tests a second run leaves the file exactly as the first run did.
fn test_patch_is_idempotent() {
    let dir = tempdir().unwrap();
    let target = dir.path().join("dashboard.ejs");
    write(&target, BROKEN_DASHBOARD);
    empty_config(&target);

    patch::execute(args_for(&target)).unwrap();
    let first = fs::read_to_string(&target).unwrap();
    patch::execute(args_for(&target)).unwrap();
    let second = fs::read_to_string(&target).unwrap();

    assert_eq!(first, second);
}

#[test]
/// Tests a template without the pattern is rewritten byte for byte.
fn test_patch_without_match_keeps_bytes() {
    let dir = tempdir().unwrap();
    let target = dir.path().join("profile.ejs");
    let content = "<h1>Karibu, <%= user.firstName %> 👋</h1>\r\n<p>Übersicht</p>";
    write(&target, content);
    empty_config(&target);

    patch::execute(args_for(&target)).unwrap();

    assert_eq!(fs::read(&target).unwrap(), content.as_bytes());
}

#[test]
/// Tests a missing target fails before anything is written.
fn test_patch_missing_target() {
    let dir = tempdir().unwrap();
    let target = dir.path().join("views").join("dashboard.ejs");
    write(&dir.path().join("views").join("ejsfix.toml"), "");

    let err = patch::execute(args_for(&target)).unwrap_err();

    assert!(matches!(err, PatchError::NotFound(_)));
    assert!(!target.exists());
}

#[test]
/// Tests a template that is not UTF-8 is left alone.
fn test_patch_rejects_invalid_utf8() {
    let dir = tempdir().unwrap();
    let target = dir.path().join("dashboard.ejs");
    let bytes = [b'<', b'p', b'>', 0xe9, b'<', b'/', b'p', b'>'];
    fs::write(&target, bytes).unwrap();
    empty_config(&target);

    let err = patch::execute(args_for(&target)).unwrap_err();

    assert!(matches!(err, PatchError::Decode(_)));
    assert_eq!(fs::read(&target).unwrap(), bytes);
}

#[test]
/// Tests --all repairs the budgets list shapes as well.
fn test_patch_all_rules() {
    let dir = tempdir().unwrap();
    let target = dir.path().join("list.ejs");
    write(
        &target,
        "<td>Ksh <%=\n  budget.amount\n  .toFixed(2) %></td>\n<td><%= budget.active ?\n  'Active' :\n  'Paused' %></td>\n",
    );
    empty_config(&target);

    patch::execute(PatchArgs {
        all: true,
        ..args_for(&target)
    })
    .unwrap();

    assert_eq!(
        fs::read_to_string(&target).unwrap(),
        "<td>Ksh <%= budget.amount.toFixed(2) %></td>\n<td><%= budget.active ? 'Active' : 'Paused' %></td>\n"
    );
}

#[test]
/// Tests the rule set can come from the config file.
fn test_patch_rules_from_config() {
    let dir = tempdir().unwrap();
    let target = dir.path().join("list.ejs");
    write(&target, "<%=\n  total\n  .toFixed(2) %>");
    write(&target.with_file_name("ejsfix.toml"), "rules = \"all\"\n");

    patch::execute(args_for(&target)).unwrap();

    assert_eq!(
        fs::read_to_string(&target).unwrap(),
        "<%= total.toFixed(2) %>"
    );
}

#[test]
/// Tests --from rebuilds the target from a backup copy.
fn test_patch_from_backup() {
    let dir = tempdir().unwrap();
    let target = dir.path().join("dashboard.ejs");
    let source = dir.path().join("dashboard.ejs.bak");
    write(&source, BROKEN_DASHBOARD);
    write(&target, "<p>hand-edited and broken</p>");
    empty_config(&target);

    patch::execute(PatchArgs {
        from: Some(source.clone()),
        ..args_for(&target)
    })
    .unwrap();

    assert_eq!(fs::read_to_string(&target).unwrap(), fixed_dashboard());
    assert_eq!(fs::read_to_string(&source).unwrap(), BROKEN_DASHBOARD);
}

#[test]
/// Tests --backup keeps the pre-patch contents next to the target.
fn test_patch_backup() {
    let dir = tempdir().unwrap();
    let target = dir.path().join("dashboard.ejs");
    write(&target, BROKEN_DASHBOARD);
    empty_config(&target);

    patch::execute(PatchArgs {
        backup: true,
        ..args_for(&target)
    })
    .unwrap();

    assert_eq!(
        fs::read_to_string(dir.path().join("dashboard.ejs.bak")).unwrap(),
        BROKEN_DASHBOARD
    );
    assert_eq!(fs::read_to_string(&target).unwrap(), fixed_dashboard());
}

#[test]
/// Tests --dry-run reports without touching the file.
fn test_patch_dry_run() {
    let dir = tempdir().unwrap();
    let target = dir.path().join("dashboard.ejs");
    write(&target, BROKEN_DASHBOARD);
    empty_config(&target);

    patch::execute(PatchArgs {
        dry_run: true,
        ..args_for(&target)
    })
    .unwrap();

    assert_eq!(fs::read_to_string(&target).unwrap(), BROKEN_DASHBOARD);
    assert!(!dir.path().join("dashboard.ejs.bak").exists());
}
