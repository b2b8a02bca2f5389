use std::path::Path;

use anyhow::Result;

use crate::io::summary::write_text;
use crate::pipeline::outcome::ErrorLog;

pub const EXAMPLE_FILE_NAME: &str = "210409 MRC Sample B1Data";

pub fn format_error_log(log: &ErrorLog) -> String {
    let mut out = String::new();
    out.push_str("Error log file:\n");
    out.push_str(
        " The following files couldn't be matched to any data in the metadata file.\n",
    );
    out.push_str(
        " This is usually due to a mismatch in naming, most likely the replicate number.\n\n",
    );
    push_list(&mut out, &log.no_metadata_match);
    out.push_str(&format!(
        "\n An example of a correctly named file that can be matched to the metadata is '{}'.\n",
        EXAMPLE_FILE_NAME
    ));
    out.push_str(
        " It begins with date ID, followed by sample ID and replicate ID and ends with 'Data'.\n",
    );
    out.push_str(
        "\n\nThe following files had some other problem with the data such as missing failure data.\n\n",
    );
    push_list(&mut out, &log.processing_failed);
    out
}

fn push_list(out: &mut String, files: &[String]) {
    if files.is_empty() {
        out.push_str(" (none)\n");
        return;
    }
    for file in files {
        out.push_str(&format!(" - {}\n", file));
    }
}

pub fn write_error_log(path: &Path, log: &ErrorLog) -> Result<()> {
    write_text(path, &format_error_log(log))
}
