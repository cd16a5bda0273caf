use blockwright::config::EngineConfig;
use blockwright::corpus::DirectoryCorpus;
use blockwright::mining::{Authorization, MiningReport, PatternMiner};
use blockwright::store::JsonFileStore;
use blockwright::test_utils::{PageFixture, ThemeFixture, init_test_logging};

const HERO: &str = "img2html/organism-hero";
const CARD_GRID: &str = "img2html/organism-card-grid";
const FOOTER: &str = "img2html/organism-footer";

fn page_of(names: &[&str]) -> String {
    PageFixture::page(&names.iter().map(|name| PageFixture::void(name)).collect::<Vec<_>>())
}

struct Theme {
    fixture: ThemeFixture,
    config: EngineConfig,
}

impl Theme {
    fn new() -> Self {
        Self {
            fixture: ThemeFixture::new().unwrap(),
            config: EngineConfig::default(),
        }
    }

    fn miner(&self) -> PatternMiner {
        PatternMiner::from_config(&self.config, self.fixture.root())
    }

    fn corpus(&self) -> DirectoryCorpus {
        DirectoryCorpus::new(self.fixture.path("content"))
    }

    fn store(&self) -> JsonFileStore {
        JsonFileStore::new(self.fixture.path(".blockwright"))
    }
}

/// A pair on two pages becomes a template; a pair on one page does not.
#[test]
fn test_frequent_pair_materialized() {
    init_test_logging(None);
    let theme = Theme::new();
    theme.fixture.page("home", &page_of(&[HERO, CARD_GRID, FOOTER])).unwrap();
    theme.fixture.page("about", &page_of(&[HERO, CARD_GRID])).unwrap();

    let outcome = theme
        .miner()
        .generate(&theme.corpus(), &theme.store(), Authorization::Granted, 2);

    assert_eq!(outcome.created, 1);
    assert_eq!(outcome.skipped, 0);
    assert_eq!(outcome.failed, 0);

    let template = &outcome.templates[0];
    assert_eq!(template.slug, "auto-seq-img2html-organism-hero--img2html-organism-card-grid");
    assert_eq!(template.name, format!("img2html/{}", template.slug));
    assert!(template.path.exists());

    let written = std::fs::read_to_string(&template.path).unwrap();
    assert!(written.starts_with("<!-- wp:group"));
    assert!(written.contains(&PageFixture::void(HERO)));
    assert!(written.contains(&PageFixture::void(CARD_GRID)));
    assert!(!written.contains(FOOTER));

    let report = MiningReport::load(&theme.store()).unwrap().unwrap();
    assert_eq!(report.window_size, 2);
    assert_eq!(report.sequence_counts[0].signature, format!("seq:{HERO}|{CARD_GRID}"));
    assert_eq!(report.sequence_counts[0].count, 2);
    assert_eq!(report.sequence_counts[1].count, 1);
}

/// A second run over the same corpus creates nothing and skips what the first created.
#[test]
fn test_repeated_runs_are_idempotent() {
    let theme = Theme::new();
    for id in ["a", "b", "c"] {
        theme.fixture.page(id, &page_of(&[HERO, CARD_GRID, FOOTER])).unwrap();
    }

    let miner = theme.miner();
    let first = miner.generate(&theme.corpus(), &theme.store(), Authorization::Granted, 3);
    assert_eq!(first.created, 3);

    let path = &first.templates[0].path;
    std::fs::write(path, "edited by hand").unwrap();

    let second = miner.generate(&theme.corpus(), &theme.store(), Authorization::Granted, 3);
    assert_eq!(second.created, 0);
    assert_eq!(second.skipped, first.created);
    assert_eq!(std::fs::read_to_string(path).unwrap(), "edited by hand");
    assert_eq!(miner.templates().list().len(), 3);
}

/// Container groupings are written verbatim, without an extra wrapper.
#[test]
fn test_group_signature_materialized() {
    let theme = Theme::new();
    let group = PageFixture::wrapped(
        "core/group",
        "img2html-section",
        &PageFixture::page(&[
            PageFixture::void("img2html/atom-button"),
            PageFixture::void("img2html/atom-link"),
        ]),
    );
    theme.fixture.page("one", &group).unwrap();
    theme.fixture.page("two", &group).unwrap();

    let outcome = theme
        .miner()
        .generate(&theme.corpus(), &theme.store(), Authorization::Granted, 3);

    assert_eq!(outcome.created, 1);
    assert_eq!(outcome.templates[0].slug, "auto-grp-core-group--img2html-atom-button--img2html-atom-link");
    assert_eq!(outcome.templates[0].content, group);

    let report = outcome.report.unwrap();
    assert!(report.sequence_counts.is_empty());
    assert_eq!(report.group_counts[0].count, 2);
}

/// Broken pages are skipped without stopping the scan.
#[test]
fn test_unparseable_page_skipped() {
    let theme = Theme::new();
    theme.fixture.page("good-1", &page_of(&[HERO, FOOTER])).unwrap();
    theme.fixture.page("broken", "<!-- wp:img2html/organism-hero -->").unwrap();
    theme.fixture.page("good-2", &page_of(&[HERO, FOOTER])).unwrap();

    let outcome = theme
        .miner()
        .generate(&theme.corpus(), &theme.store(), Authorization::Granted, 2);

    assert_eq!(outcome.created, 1);
    assert_eq!(outcome.report.unwrap().sequence_counts[0].count, 2);
}

/// Without authorization nothing is scanned, written or stored.
#[test]
fn test_denied_run_has_no_effect() {
    let theme = Theme::new();
    theme.fixture.page("a", &page_of(&[HERO, FOOTER])).unwrap();
    theme.fixture.page("b", &page_of(&[HERO, FOOTER])).unwrap();

    let outcome = theme
        .miner()
        .generate(&theme.corpus(), &theme.store(), Authorization::Denied, 2);

    assert_eq!(outcome.created, 0);
    assert_eq!(outcome.skipped, 0);
    assert!(outcome.report.is_none());
    assert!(!theme.fixture.path("patterns").exists());
    assert!(MiningReport::load(&theme.store()).unwrap().is_none());
}

/// An unwritable patterns directory is counted, not raised.
#[test]
fn test_write_failure_reported() {
    let theme = Theme::new();
    theme.fixture.page("a", &page_of(&[HERO, FOOTER])).unwrap();
    theme.fixture.page("b", &page_of(&[HERO, FOOTER])).unwrap();
    theme.fixture.write("patterns", "not a directory").unwrap();

    let outcome = theme
        .miner()
        .generate(&theme.corpus(), &theme.store(), Authorization::Granted, 2);

    assert_eq!(outcome.created, 0);
    assert_eq!(outcome.failed, 1);
    assert!(outcome.report.is_some());
}
