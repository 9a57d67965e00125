//! Descriptor hygiene: running lines must not leave descriptors open in the shell.
//!
//! Kept in its own test binary so no concurrently running test opens files
//! while the descriptor table is being counted.

#![cfg(target_os = "linux")]

use sshell::Interpreter;
use std::fs;

fn open_descriptors() -> usize {
    fs::read_dir("/proc/self/fd").unwrap().count()
}

#[test]
fn no_descriptor_leaks_across_lines() {
    let out = std::env::temp_dir().join(format!("sshell_fd_{}", std::process::id()));
    let mut sh = Interpreter::default();
    let lines = [
        "a > f | b".to_string(),
        "a >".to_string(),
        format!("echo hi | cat | wc -c > {}", out.display()),
        format!("echo again >> {}", out.display()),
        format!("nonexistentcmd123 | cat > {}", out.display()),
        format!("echo x | cat > {}/no/such/dir", out.display()),
    ];

    // warm up lazily opened handles before taking the baseline
    let (mut o, mut e) = (Vec::<u8>::new(), Vec::<u8>::new());
    sh.execute_line("true", &mut o, &mut e).unwrap();

    let baseline = open_descriptors();
    for _ in 0..2 {
        for line in &lines {
            let (mut stdout, mut stderr) = (Vec::<u8>::new(), Vec::<u8>::new());
            sh.execute_line(line, &mut stdout, &mut stderr).unwrap();
            assert_eq!(open_descriptors(), baseline, "after {:?}", line);
        }
    }

    let _ = fs::remove_file(out);
}
