//! Feed generated files to the real `ninja` when it is installed.

use anyhow::{Context, Result, ensure};
use assert_cmd::Command;
use test_support::Workspace;
use test_support::ninja::{probe_ninja, run_ninja};

#[test]
fn ninja_accepts_the_generated_file() -> Result<()> {
    if let Err(err) = probe_ninja() {
        eprintln!("skipping test: {err}");
        return Ok(());
    }
    let ws = Workspace::new()?;
    ws.write("Blueprints", include_str!("data/Blueprints"))?;
    ws.write("lib/Blueprints", include_str!("data/lib/Blueprints"))?;
    Command::cargo_bin("toyen")
        .context("locate toyen binary")?
        .current_dir(ws.root())
        .args(["--out", "out", "Blueprints"])
        .assert()
        .success();

    let out = ws.path("out");
    for args in [["-t", "query", "all"], ["-t", "targets", "all"]] {
        let output = run_ninja(&out, &args).context("run ninja")?;
        ensure!(
            output.status.success(),
            "ninja {args:?} failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
    }

    let output = run_ninja(&out, &["-t", "query", "headers"]).context("query headers")?;
    let stdout = String::from_utf8_lossy(&output.stdout);
    ensure!(stdout.contains("out/include/a.h"), "{stdout}");
    Ok(())
}
