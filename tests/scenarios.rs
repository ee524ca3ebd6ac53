use std::path::Path;
use std::sync::Arc;

use pagecheck::config::{CallPatterns, ConventionTable};
use pagecheck::fingerprint::fingerprint;
use pagecheck::fs::MemoryFs;
use pagecheck::resolver::{ProjectRoot, page_exists};
use pagecheck::rule::PageExistsRule;
use pagecheck::scanner::check_source;
use pagecheck::types::Finding;

fn laravel_app() -> MemoryFs {
    MemoryFs::new()
        .with_file("/srv/app/composer.json", 10)
        .with_file("/srv/app/resources/js/Pages/Auth/Login.vue", 20)
        .with_file("/srv/app/resources/js/pages/Auth/Login.jsx", 30)
}

fn findings_for(fs: MemoryFs, php: &str) -> Vec<Finding> {
    let root = ProjectRoot::discover(&fs, Path::new("/srv/app/app/Http/Controllers"));
    let rule = PageExistsRule::new(Arc::new(fs), root, ConventionTable::default(), CallPatterns::default());
    check_source(Path::new("app/Http/Controllers/AuthController.php"), php, &rule).unwrap()
}

#[test]
fn existing_page_renders_cleanly() {
    assert!(findings_for(laravel_app(), "<?php return Inertia::render('Auth/Login');").is_empty());
}

#[test]
fn missing_page_yields_one_diagnostic() {
    let findings = findings_for(laravel_app(), "<?php return Inertia::render('Auth/Missing');");
    let messages: Vec<&str> = findings.iter().map(|f| f.message.as_str()).collect();
    assert_eq!(messages, ["Page \"Auth/Missing\" does not exist on disk."]);
}

#[test]
fn variable_page_name_is_never_reported() {
    assert!(findings_for(MemoryFs::new(), "<?php return Inertia::render($variableName);").is_empty());
}

#[test]
fn route_registration_reads_second_argument_in_dot_notation() {
    let fs = MemoryFs::new()
        .with_file("/srv/app/composer.json", 10)
        .with_file("/srv/app/resources/js/pages/Auth/Login.jsx", 30);
    assert!(findings_for(fs, "<?php Route::inertia('/login', 'Auth.Login');").is_empty());
}

#[test]
fn no_marker_resolves_from_working_directory() {
    let fs = MemoryFs::new().with_file("/home/dev/site/resources/js/Pages/Home.vue", 1);
    let root = ProjectRoot::discover(&fs, Path::new("/home/dev/site"));
    assert!(!root.marker_found);
    assert!(page_exists(&fs, &root.path, "Home", &ConventionTable::default()));
}

#[test]
fn dot_and_slash_notation_agree() {
    let fs = laravel_app();
    let table = ConventionTable::default();
    let root = Path::new("/srv/app");
    for (dotted, slashed) in [("Auth.Login", "Auth/Login"), ("Auth.Missing", "Auth/Missing")] {
        assert_eq!(
            page_exists(&fs, root, dotted, &table),
            page_exists(&fs, root, slashed, &table)
        );
    }
}

#[test]
fn new_page_changes_fingerprint_until_removed() {
    let mut fs = laravel_app();
    let table = ConventionTable::default();
    let root = Path::new("/srv/app");
    let before = fingerprint(&fs, root, &table);

    fs.insert("/srv/app/resources/ts/Pages/New.tsx", 40);
    assert_ne!(fingerprint(&fs, root, &table), before);

    fs.remove(Path::new("/srv/app/resources/ts/Pages/New.tsx"));
    assert_eq!(fingerprint(&fs, root, &table), before);
}

#[test]
fn every_call_shape_is_checked() {
    let php = r"<?php
Inertia::render('A');
\Inertia\Inertia::render('B');
Route::inertia('/c', 'C');
inertia('D');
$this->inertia('E');
";
    let lines: Vec<usize> = findings_for(laravel_app(), php).iter().map(|f| f.line).collect();
    assert_eq!(lines, [2, 3, 4, 5, 6]);
}

#[test]
fn escaped_double_quoted_name_resolves_to_its_value() {
    let fs = laravel_app().with_file("/srv/app/resources/js/Pages/AB.vue", 50);
    assert!(findings_for(fs.clone(), r#"<?php inertia("A\x42");"#).is_empty());
    assert!(findings_for(fs.clone(), r#"<?php inertia("\101\u{42}");"#).is_empty());
    assert!(findings_for(fs, r#"<?php inertia("A\xFF");"#).is_empty());
}
