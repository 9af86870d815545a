//! Shared test fixtures: a miniature but complete source checkout.

use std::{fs, path::Path};

use tempfile::TempDir;

pub(crate) fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// Lays down a source tree with two principles, three guidelines (one
/// version-pinned), four success criteria across all three revisions, and
/// four techniques in two technologies.
pub(crate) fn fixture_tree() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();

    write(
        root,
        "understanding/20/non-text-content.html",
        "<h1>Understanding Non-text Content</h1>",
    );
    write(
        root,
        "understanding/20/keyboard.html",
        "<h1>Understanding Keyboard</h1>",
    );
    write(
        root,
        "understanding/21/pointer-gestures.html",
        "<h1>Understanding Pointer Gestures</h1>",
    );
    write(
        root,
        "understanding/22/focus-appearance.html",
        "<h1>Understanding Focus Appearance</h1>",
    );

    write(
        root,
        "guidelines/index.html",
        r#"<html><body>
        <section class="principle" id="perceivable"><h2>Perceivable</h2>
          <section class="guideline" id="text-alternatives"><h3>Text Alternatives</h3>
            <section class="sc" id="non-text-content"><h4>Non-text Content</h4>
              <p class="conformance-level">A</p>
            </section>
          </section>
        </section>
        <section class="principle" id="operable"><h2>Operable</h2>
          <section class="guideline" id="keyboard-accessible"><h3>Keyboard Accessible</h3>
            <section class="sc" id="keyboard"><h4>Keyboard</h4>
              <p class="conformance-level">A</p>
            </section>
            <section class="sc" id="focus-appearance"><h4>Focus Appearance</h4>
              <p class="conformance-level">AAA</p>
            </section>
          </section>
          <section class="guideline" id="input-modalities"><h3>Input Modalities</h3>
            <section class="sc" id="pointer-gestures"><h4>Pointer Gestures</h4>
              <p class="conformance-level">A</p>
            </section>
          </section>
        </section>
        </body></html>"#,
    );

    write(
        root,
        "techniques/general/G1.html",
        "<h1>Adding a link at the top of each page</h1>",
    );
    write(
        root,
        "techniques/general/G10.html",
        "<h1>Creating components that change notifications</h1>",
    );
    write(
        root,
        "techniques/general/G2.html",
        "<h1>Providing easy-to-read content</h1>",
    );
    write(
        root,
        "techniques/html/H37.html",
        "<h1>Using <code>alt</code> attributes</h1>",
    );

    tmp
}
