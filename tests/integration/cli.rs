use assert_cmd::Command;
use blockwright::test_utils::{PageFixture, ThemeFixture};
use predicates::prelude::*;

fn blockwright(theme: &ThemeFixture) -> Command {
    let mut cmd = Command::cargo_bin("blockwright").unwrap();
    cmd.arg("--theme")
        .arg(theme.root())
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    cmd
}

fn theme_with_pages() -> ThemeFixture {
    let theme = ThemeFixture::new().unwrap();
    let page = PageFixture::page(&[
        PageFixture::void("img2html/organism-hero"),
        PageFixture::void("img2html/organism-footer"),
    ]);
    theme.page("home", &page).unwrap();
    theme.page("about", &page).unwrap();
    theme
}

#[test]
fn test_help_lists_commands() {
    Command::cargo_bin("blockwright")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("assets"))
        .stdout(predicate::str::contains("validate"))
        .stdout(predicate::str::contains("patterns"))
        .stdout(predicate::str::contains("docs"));
}

#[test]
fn test_validate_reports_violations() {
    let theme = ThemeFixture::new().unwrap();
    let page = theme
        .page(
            "landing",
            &PageFixture::wrapped(
                "img2html/molecule-card",
                "img2html-card",
                &PageFixture::void("img2html/organism-hero"),
            ),
        )
        .unwrap();

    blockwright(&theme)
        .arg("validate")
        .arg(&page)
        .assert()
        .success()
        .stdout(predicate::str::contains("1 composition violations in page landing"))
        .stdout(predicate::str::contains("img2html/molecule-card -> img2html/organism-hero"));

    assert!(theme.path(".blockwright/composition_report%2Flanding.json").exists());
}

#[test]
fn test_validate_json_uses_page_id_flag() {
    let theme = ThemeFixture::new().unwrap();
    let page = theme.page("landing", &PageFixture::void("img2html/atom-button")).unwrap();

    blockwright(&theme)
        .args(["validate", "--page-id", "17", "--format", "json"])
        .arg(&page)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"pageId\": \"17\""))
        .stdout(predicate::str::contains("\"ok\": true"));
}

#[test]
fn test_validate_nested_page_uses_corpus_id() {
    let theme = ThemeFixture::new().unwrap();
    let page = theme.page("blog/first", &PageFixture::void("img2html/atom-button")).unwrap();

    blockwright(&theme)
        .args(["validate", "--format", "json"])
        .arg(&page)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"pageId\": \"blog/first\""));

    assert!(theme.path(".blockwright/composition_report%2Fblog%2Ffirst.json").is_file());
}

#[test]
fn test_validate_missing_page_fails() {
    let theme = ThemeFixture::new().unwrap();

    blockwright(&theme)
        .arg("validate")
        .arg(theme.path("content/nope.html"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("nope.html"));
}

#[test]
fn test_patterns_generate_then_report() {
    let theme = theme_with_pages();

    blockwright(&theme)
        .args(["patterns", "generate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 created, 0 skipped"))
        .stdout(predicate::str::contains("auto-seq-img2html-organism-hero--img2html-organism-footer"));

    blockwright(&theme)
        .args(["patterns", "generate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0 created, 1 skipped"));

    blockwright(&theme)
        .args(["patterns", "report"])
        .assert()
        .success()
        .stdout(predicate::str::contains("seq:img2html/organism-hero|img2html/organism-footer"));
}

#[test]
fn test_patterns_min_support_rejects_zero() {
    let theme = ThemeFixture::new().unwrap();

    blockwright(&theme)
        .args(["patterns", "generate", "--min-support", "0"])
        .assert()
        .failure();
}

#[test]
fn test_patterns_report_before_generate() {
    let theme = ThemeFixture::new().unwrap();

    blockwright(&theme)
        .args(["patterns", "report"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No mining report yet"));
}

#[test]
fn test_assets_render_json() {
    let theme = ThemeFixture::new().unwrap();
    theme.manifest("{}").unwrap();
    theme.write("assets/components/img2html-card.css", "").unwrap();
    let page = theme
        .page("home", &PageFixture::wrapped("core/group", "img2html-card", "x"))
        .unwrap();

    blockwright(&theme)
        .args(["assets", "render", "--format", "json"])
        .arg(&page)
        .assert()
        .success()
        .stdout(predicate::str::contains("assets/components/img2html-card.css"))
        .stdout(predicate::str::contains("\"shared_component\""));
}

#[test]
fn test_assets_without_manifest_loads_nothing() {
    let theme = ThemeFixture::new().unwrap();
    theme.write("assets/components/img2html-card.css", "").unwrap();

    blockwright(&theme)
        .args(["assets", "editor"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No assets to load"));
}

#[test]
fn test_invalid_config_fails() {
    let theme = ThemeFixture::new().unwrap();
    theme.config("naming_prefix = \"\"\n").unwrap();

    blockwright(&theme).args(["patterns", "report"]).assert().failure();
}

#[test]
fn test_docs_written() {
    let theme = theme_with_pages();
    blockwright(&theme).args(["patterns", "generate"]).assert().success();

    blockwright(&theme).arg("docs").assert().success();

    let compose = std::fs::read_to_string(theme.path("docs/COMPOSE.md")).unwrap();
    assert!(compose.contains("seq:img2html/organism-hero|img2html/organism-footer"));
    let guide = std::fs::read_to_string(theme.path("docs/PATTERNS_GUIDE.md")).unwrap();
    assert!(guide.contains("auto-seq-img2html-organism-hero--img2html-organism-footer"));
}
