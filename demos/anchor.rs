use hyperlink::{Document, DocumentOptions, HtmlAnchorElement, HyperlinkElementUtils};
use std::rc::Rc;

fn main() {
    let document = Document::new(
        DocumentOptions::default().with_url("https://example.com/docs/guide/index.html"),
    )
    .expect("Failed to build document");

    let mut anchor = HtmlAnchorElement::with_href(Rc::clone(&document), "../api/?v=1");
    println!("href: {}", anchor.href()); // https://example.com/docs/api/?v=1

    // Setters rewrite the href attribute
    anchor.set_hostname("docs.example.com");
    anchor.set_search("v=2");
    anchor.set_hash("parse");
    println!("href: {}", anchor.href()); // https://docs.example.com/docs/api/?v=2#parse
    println!("attribute: {:?}", anchor.get_attribute("href"));

    // Rejected values leave the element alone
    anchor.set_port("99999");
    println!("port: {:?}", anchor.port()); // ""

    // A <base> element changes how relative hrefs resolve
    document.set_base_href(Some("https://cdn.example.net/"));
    anchor.set_href("logo.svg");
    println!("href: {}", anchor.href()); // https://cdn.example.net/logo.svg
    println!("origin: {}", anchor.origin()); // https://cdn.example.net

    // Opaque URLs have no host to set
    anchor.set_href("mailto:dev@example.com");
    anchor.set_host("example.org");
    println!("href: {}", anchor); // mailto:dev@example.com
}
