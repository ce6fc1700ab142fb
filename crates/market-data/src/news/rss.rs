//! Minimal RSS 2.0 / Atom reader.
//!
//! Only the fields the news list needs are extracted: the feed title and,
//! per item, title, summary and publication time.

use quick_xml::events::Event;
use quick_xml::Reader;

/// Parsed feed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Feed {
    pub title: String,
    pub items: Vec<FeedItem>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct FeedItem {
    pub title: String,
    pub summary: String,
    pub published: String,
}

/// Parse an RSS or Atom document.
///
/// Namespace prefixes are ignored (`dc:date` reads as `date`). Fails when
/// the XML is malformed or has neither a `channel` nor a `feed` element.
pub fn parse_feed(xml: &str) -> Result<Feed, String> {
    let mut reader = Reader::from_str(xml);
    let mut buf = Vec::new();

    let mut feed = Feed::default();
    let mut stack: Vec<String> = Vec::new();
    let mut item: Option<FeedItem> = None;
    let mut text = String::new();
    let mut is_feed = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let name = String::from_utf8_lossy(e.local_name().as_ref()).to_string();
                match name.as_str() {
                    "channel" | "feed" => is_feed = true,
                    "item" | "entry" => item = Some(FeedItem::default()),
                    _ => {}
                }
                stack.push(name);
                text.clear();
            }
            Ok(Event::Text(ref e)) => match e.unescape() {
                Ok(t) => text.push_str(&t),
                Err(_) => text.push_str(&String::from_utf8_lossy(e)),
            },
            Ok(Event::CData(e)) => {
                text.push_str(&String::from_utf8_lossy(&e.into_inner()));
            }
            Ok(Event::End(ref e)) => {
                let name = String::from_utf8_lossy(e.local_name().as_ref()).to_string();
                stack.pop();
                let value = text.trim().to_string();
                text.clear();

                if name == "item" || name == "entry" {
                    if let Some(done) = item.take() {
                        feed.items.push(done);
                    }
                } else if let Some(current) = item.as_mut() {
                    match name.as_str() {
                        "title" => current.title = value,
                        "description" | "summary" => current.summary = value,
                        "content" | "encoded" if current.summary.is_empty() => {
                            current.summary = value
                        }
                        "pubDate" | "published" => current.published = value,
                        "updated" | "date" if current.published.is_empty() => {
                            current.published = value
                        }
                        _ => {}
                    }
                } else if name == "title" && feed.title.is_empty() {
                    // channel/title or feed/title, not image/title
                    if matches!(stack.last().map(String::as_str), Some("channel" | "feed")) {
                        feed.title = value;
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(format!(
                    "XML error at position {}: {}",
                    reader.error_position(),
                    e
                ))
            }
            _ => {}
        }
        buf.clear();
    }

    if !is_feed {
        return Err("document is not an RSS or Atom feed".to_string());
    }
    Ok(feed)
}

#[cfg(test)]
mod tests {
    use super::*;

    const RSS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0" xmlns:dc="http://purl.org/dc/elements/1.1/">
  <channel>
    <title>MarketWatch.com - Top Stories</title>
    <image><title>MarketWatch logo</title></image>
    <item>
      <title>Stocks rally as yields fall</title>
      <description><![CDATA[<p>The S&P 500 rose 1.2%.</p>]]></description>
      <pubDate>Mon, 14 Oct 2024 20:05:00 GMT</pubDate>
    </item>
    <item>
      <title>Oil &amp; gas slump</title>
      <description>Crude slid for a third session.</description>
      <dc:date>2024-10-14T18:00:00Z</dc:date>
    </item>
  </channel>
</rss>"#;

    const ATOM: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title>Crypto Desk</title>
  <entry>
    <title>Bitcoin tops $70k</title>
    <content type="html">ETF inflows continue.</content>
    <updated>2024-10-15T01:00:00Z</updated>
  </entry>
</feed>"#;

    #[test]
    fn test_parse_rss() {
        let feed = parse_feed(RSS).unwrap();
        assert_eq!(feed.title, "MarketWatch.com - Top Stories");
        assert_eq!(feed.items.len(), 2);

        assert_eq!(feed.items[0].title, "Stocks rally as yields fall");
        assert_eq!(feed.items[0].summary, "<p>The S&P 500 rose 1.2%.</p>");
        assert_eq!(feed.items[0].published, "Mon, 14 Oct 2024 20:05:00 GMT");

        assert_eq!(feed.items[1].title, "Oil & gas slump");
        assert_eq!(feed.items[1].published, "2024-10-14T18:00:00Z");
    }

    #[test]
    fn test_parse_atom() {
        let feed = parse_feed(ATOM).unwrap();
        assert_eq!(feed.title, "Crypto Desk");
        assert_eq!(
            feed.items,
            vec![FeedItem {
                title: "Bitcoin tops $70k".to_string(),
                summary: "ETF inflows continue.".to_string(),
                published: "2024-10-15T01:00:00Z".to_string(),
            }]
        );
    }

    #[test]
    fn test_rejects_non_feed() {
        assert!(parse_feed("<html><body>blocked</body></html>").is_err());
        assert!(parse_feed("<rss><channel><item></channel></rss>").is_err());
    }
}
