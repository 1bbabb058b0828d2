use std::path::Path;

use tokio::io;

/// Read a file from the given path into a list of strings
///
/// Files that are not valid UTF-8 are decoded as Latin-1, so legacy word lists still load.
pub async fn read_file<P: AsRef<Path>>(path: P) -> io::Result<Vec<String>> {
    let bytes = tokio::fs::read(path).await?;

    Ok(decode(bytes).lines().map(str::to_string).collect())
}

fn decode(bytes: Vec<u8>) -> String {
    String::from_utf8(bytes)
        .unwrap_or_else(|err| err.into_bytes().into_iter().map(char::from).collect())
}
