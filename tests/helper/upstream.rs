//! Mock listing pages served by mockito

use mockito::{Mock, ServerGuard};

use pyversion_server::scan::ChannelUrls;

pub const STABLE_PAGE: &str = r#"<!doctype html>
<html><body>
  <nav><a href="https://www.python.org/ftp/python/9.9.9/">menu link</a></nav>
  <div class="col-row two-col">
    <div class="column">
      <h2>Stable Releases</h2>
      <ul>
        <li><a href="/downloads/release/python-3121/">Python 3.12.1 - Dec. 8, 2023</a>
          <ul>
            <li>Download <a href="https://www.python.org/ftp/python/3.12.1/Python-3.12.1.tgz">Gzipped source tarball</a></li>
            <li>Download <a href="https://www.python.org/ftp/python/3.12.1/Python-3.12.1.tar.xz">XZ compressed source tarball</a></li>
          </ul>
        </li>
        <li><a href="/downloads/release/python-3117/">Python 3.11.7 - Dec. 4, 2023</a>
          <ul>
            <li>Download <a href="https://www.python.org/ftp/python/3.11.7/Python-3.11.7.tgz">Gzipped source tarball</a></li>
          </ul>
        </li>
      </ul>
    </div>
    <div class="column">
      <h2>Pre-releases</h2>
      <ul>
        <li>Download <a href="https://www.python.org/ftp/python/3.13.0/Python-3.13.0a2.tgz">Gzipped source tarball</a></li>
      </ul>
    </div>
  </div>
</body></html>
"#;

pub const FTP_LISTING: &str = r#"<html>
<head><title>Index of /ftp/python/</title></head>
<body>
<h1>Index of /ftp/python/</h1><hr><pre><a href="../">../</a>
<a href="2.0/">2.0/</a>                                               27-Feb-2018 04:35       -
<a href="2.7.18/">2.7.18/</a>                                         20-Apr-2020 14:28       -
<a href="3.9.1/">3.9.1/</a>                                           07-Dec-2020 17:47       -
<a href="3.13.0/">3.13.0/</a>                                         07-Oct-2024 08:02       -
<a href="3.10.0/">3.10.0/</a>                                         04-Oct-2021 17:04       -
<a href="3.9.12/">3.9.12/</a>                                         23-Mar-2022 22:40       -
<a href="doc/">doc/</a>                                               20-Apr-2020 14:28       -
<a href="README.html">README.html</a>                                 24-Mar-2011 15:55    7.2K
</pre><hr></body>
</html>
"#;

pub const EMPTY_PAGE: &str = "<html><body><p>Down for maintenance</p></body></html>";

/// Serve `body` at `path` on `server` and return the mock plus its URL.
pub async fn mock_upstream(
    server: &mut ServerGuard,
    path: &str,
    status: usize,
    body: &str,
) -> (Mock, String) {
    let mock = server
        .mock("GET", path)
        .with_status(status)
        .with_header("content-type", "text/html")
        .with_body(body)
        .create_async()
        .await;
    (mock, format!("{}{}", server.url(), path))
}

pub fn channel_urls(stable: &str, prerelease: &str) -> ChannelUrls {
    ChannelUrls {
        stable: stable.to_string(),
        prerelease: prerelease.to_string(),
    }
}
