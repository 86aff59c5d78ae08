use hyperlink::Url;

fn main() {
    // Parse a simple URL
    let url = Url::parse("https://example.com:8080/path?query=value#hash", None)
        .expect("Failed to parse URL");

    println!("URL: {}", url.href()); // https://example.com:8080/path?query=value#hash
    println!("Protocol: {}", url.protocol()); // https:
    println!("Host: {}", url.host()); // example.com:8080
    println!("Port: {}", url.port()); // 8080
    println!("Pathname: {}", url.pathname()); // /path
    println!("Search: {}", url.search()); // ?query=value
    println!("Hash: {}", url.hash()); // #hash
    println!("Origin: {}", url.origin()); // https://example.com:8080

    // Resolve against a base
    let relative = Url::parse("../img/logo.png", Some("https://example.com/docs/guide/"))
        .expect("Failed to resolve URL");
    println!("Resolved: {relative}"); // https://example.com/docs/img/logo.png

    // Validation errors are reported without failing the parse
    let (result, violations) = Url::parse_with_violations(" http://example.com\\a ", None);
    println!("Lenient: {}", result.expect("Failed to parse URL")); // http://example.com/a
    for violation in violations.iter() {
        println!("  {violation}");
    }
}
