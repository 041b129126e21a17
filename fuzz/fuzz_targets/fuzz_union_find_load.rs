#![no_main]
use libfuzzer_sys::fuzz_target;
use text_dedup::UnionFind;

/// Fuzz union-find persistence loading.
///
/// Arbitrary bytes must either parse into a loadable structure or produce
/// a typed input error; never a panic.
fuzz_target!(|data: &[u8]| {
    let dir = std::env::temp_dir().join("text-dedup-fuzz");
    let _ = std::fs::create_dir_all(&dir);
    let path = dir.join(format!("uf-{}.json", std::process::id()));
    if std::fs::write(&path, data).is_ok() {
        let _ = UnionFind::load(&path);
        let _ = std::fs::remove_file(&path);
    }
});
