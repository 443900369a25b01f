//! Process and machine information

use crate::error::{Result, VoblaError};
use crate::status::Status;
use lazy_static::lazy_static;
use regex::Regex;
use std::fs;

lazy_static! {
    /// Read once on first access and reused for the life of the process
    static ref CPU_FREQUENCY: f64 = read_cpu_frequency();
    static ref CPU_MHZ: Regex = Regex::new(r"(?m)^cpu MHz\s*:\s*([0-9]+(?:\.[0-9]+)?)").unwrap();
    static ref PPID: Regex = Regex::new(r"(?m)^PPid:\s*(\d+)").unwrap();
}

/// CPU frequency in Hz, or 0.0 when the platform does not expose it
pub fn cpu_frequency() -> f64 {
    *CPU_FREQUENCY
}

/// Number of logical CPUs
pub fn num_cpus() -> usize {
    num_cpus::get()
}

/// Parent process id of `pid`.
///
/// Pid 0 has no parent and maps to 0. `None` when the process cannot be read.
pub fn parent_pid(pid: u32) -> Option<u32> {
    if pid == 0 {
        return Some(0);
    }
    let status = fs::read_to_string(format!("/proc/{}/status", pid)).ok()?;
    parse_parent_pid(&status)
}

/// Executable name of `pid`, without its directory
pub fn process_name(pid: u32) -> Result<String> {
    let cmdline = fs::read(format!("/proc/{}/cmdline", pid))?;
    parse_process_name(&cmdline).ok_or_else(|| {
        VoblaError::Status(Status::new(-1, format!("process {} has an empty command line", pid)))
    })
}

fn read_cpu_frequency() -> f64 {
    fs::read_to_string("/proc/cpuinfo")
        .ok()
        .and_then(|text| parse_cpu_frequency(&text))
        .unwrap_or(0.0)
}

fn parse_cpu_frequency(cpuinfo: &str) -> Option<f64> {
    let caps = CPU_MHZ.captures(cpuinfo)?;
    let mhz: f64 = caps[1].parse().ok()?;
    Some(mhz * 1_000_000.0)
}

fn parse_parent_pid(status: &str) -> Option<u32> {
    let caps = PPID.captures(status)?;
    caps[1].parse().ok()
}

fn parse_process_name(cmdline: &[u8]) -> Option<String> {
    let first = cmdline.split(|b| *b == 0).next()?;
    if first.is_empty() {
        return None;
    }
    let first = String::from_utf8_lossy(first);
    let name = first.rsplit('/').next().unwrap_or(&first);
    Some(name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cpu_frequency() {
        let cpuinfo = "processor\t: 0\nmodel name\t: Test CPU\ncpu MHz\t\t: 2400.125\ncache size\t: 512 KB\n";
        assert_eq!(parse_cpu_frequency(cpuinfo), Some(2_400_125_000.0));
        assert_eq!(parse_cpu_frequency("processor\t: 0\n"), None);
    }

    #[test]
    fn test_cpu_frequency_is_cached() {
        let first = cpu_frequency();
        assert!(first >= 0.0);
        assert_eq!(cpu_frequency(), first);
    }

    #[test]
    fn test_parse_parent_pid() {
        let status = "Name:\tbash\nState:\tS (sleeping)\nPid:\t42\nPPid:\t7\n";
        assert_eq!(parse_parent_pid(status), Some(7));
        assert_eq!(parse_parent_pid("Name:\tbash\n"), None);
    }

    #[test]
    fn test_parse_process_name() {
        assert_eq!(parse_process_name(b"/usr/bin/vim\0file.txt\0"), Some("vim".to_string()));
        assert_eq!(parse_process_name(b"cargo\0test\0"), Some("cargo".to_string()));
        assert_eq!(parse_process_name(b""), None);
    }

    #[test]
    fn test_parent_pid_of_zero() {
        assert_eq!(parent_pid(0), Some(0));
    }

    #[test]
    fn test_num_cpus_positive() {
        assert!(num_cpus() >= 1);
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_current_process() {
        let pid = std::process::id();
        assert!(parent_pid(pid).is_some());
        assert!(!process_name(pid).unwrap().is_empty());
    }
}
