//! Mirror-site fixtures shared by the CLI test targets; not every target uses all of them.
#![allow(dead_code)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use serde_json::Value;
use std::fs;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tempfile::TempDir;
use zip::write::SimpleFileOptions;

pub const DAY: u64 = 86_400;

pub struct TestEnv {
    _tmp: TempDir,
    pub home: PathBuf,
    pub site: PathBuf,
    pub root: PathBuf,
    pub log: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let home = tmp.path().join("home");
        let site = tmp.path().join("site");
        fs::create_dir_all(&home).expect("create isolated home");
        fs::create_dir_all(&site).expect("create mirror site");

        Self {
            root: tmp.path().join("simfiles"),
            log: tmp.path().join("logs/simsync.log"),
            _tmp: tmp,
            home,
            site,
        }
    }

    pub fn cmd(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("simsync");
        cmd.env("HOME", &self.home)
            .env_remove("SIMSYNC_LOG")
            .arg("--site")
            .arg(&self.site)
            .arg("--root")
            .arg(&self.root)
            .arg("--log-file")
            .arg(&self.log);
        cmd
    }

    pub fn run_json(&self, args: &[&str]) -> Value {
        let out = self
            .cmd()
            .arg("--json")
            .args(args)
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        serde_json::from_slice(&out).expect("valid json output")
    }

    fn write_page(&self, relative: &str, body: impl AsRef<[u8]>) {
        let name = relative.replace(['?', '&', '='], "_");
        fs::write(self.site.join(name), body).expect("write mirror page");
    }

    /// Category listing with `(id, name, age cell)` rows.
    pub fn listing(&self, category_id: u64, rows: &[(&str, &str, &str)]) {
        let body: String = rows
            .iter()
            .map(|(id, name, age)| {
                format!(
                    r#"<tr class="simfile"><td><a id="sim{id}" href="viewsimfile.php?simfileid={id}">{name}</a></td>
                       <td>Some Artist</td><td>{age}</td></tr>"#
                )
            })
            .collect();
        self.write_page(
            &format!("viewsimfilecategory.php?categoryid={}", category_id),
            format!("<html><body><table>{}</table></body></html>", body),
        );
    }

    /// Item page plus its zip archive holding `<name>/<name>.<ext>`.
    pub fn item(&self, id: &str, category: &str, name: &str, ext: &str, chart: &str) {
        self.write_page(
            &format!("viewsimfile.php?simfileid={}", id),
            format!(
                r#"<html><body>
                <div id="top-nav"><a href="index.php">Home</a> &gt;
                  <a href="viewsimfilecategory.php">{category}</a> &gt;
                  <a href="viewsimfile.php?simfileid={id}">{name}</a></div>
                <table><tr><th>Last Activity</th><td>1 day ago (2024-03-04 10:20AM)</td></tr></table>
                <a href="download.php?type=ddrsimfile&amp;simfileid={id}">ZIP</a>
                </body></html>"#
            ),
        );
        let member = format!("{name}/{name}.{ext}");
        self.write_page(
            &format!("download.php?type=ddrsimfile&simfileid={}", id),
            zip_bytes(&[(member.as_str(), chart)]),
        );
    }

    pub fn chart(&self, version: &str, name: &str, ext: &str) -> PathBuf {
        self.root
            .join(version)
            .join(name)
            .join(format!("{}.{}", name, ext))
    }

    /// Stores a local chart last modified `age_secs` ago.
    pub fn local_chart(&self, version: &str, name: &str, ext: &str, age_secs: u64) -> PathBuf {
        let path = self.chart(version, name, ext);
        fs::create_dir_all(path.parent().expect("chart dir")).expect("create chart dir");
        fs::write(&path, "local").expect("write chart");
        set_age(&path, age_secs);
        path
    }
}

pub fn set_age(path: &Path, age_secs: u64) {
    fs::File::options()
        .write(true)
        .open(path)
        .expect("open chart")
        .set_modified(SystemTime::now() - Duration::from_secs(age_secs))
        .expect("set mtime");
}

pub fn zip_bytes(files: &[(&str, &str)]) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    for (name, body) in files {
        writer
            .start_file(*name, SimpleFileOptions::default())
            .expect("start zip member");
        writer.write_all(body.as_bytes()).expect("write zip member");
    }
    writer.finish().expect("finish zip").into_inner()
}
