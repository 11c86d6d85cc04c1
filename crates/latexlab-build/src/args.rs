//! Directories a tool writes to, read off its command line

use latexlab_core::BuildStep;

const OUTDIR_FLAGS: &[&str] = &["-outdir=", "--outdir=", "-output-directory=", "--output-directory="];
const AUXDIR_FLAGS: &[&str] = &["-auxdir=", "--auxdir=", "-aux-directory=", "--aux-directory="];

/// The output and auxiliary directories named by expanded `args`
///
/// The last occurrence of a flag wins, as it does for latexmk.
pub fn dirs_from_args(args: &[String]) -> BuildStep {
    let mut step = BuildStep::default();
    for arg in args {
        if let Some(dir) = flag_value(arg, OUTDIR_FLAGS) {
            step.outdir = Some(dir.to_string());
        } else if let Some(dir) = flag_value(arg, AUXDIR_FLAGS) {
            step.auxdir = Some(dir.to_string());
        }
    }
    step
}

fn flag_value<'a>(arg: &'a str, flags: &[&str]) -> Option<&'a str> {
    flags
        .iter()
        .find_map(|flag| arg.strip_prefix(flag))
        .map(|value| value.trim_matches('"'))
        .filter(|value| !value.is_empty())
}
