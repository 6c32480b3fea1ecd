use hyperdoc::alps::{self, new_descriptor, new_profile, Control, Doc, Format};
use hyperdoc::collection::{self, new_collection, new_query, Datum};
use hyperdoc::{parse_collection, Document, HyperError};
use url::Url;

fn main() {
    match run() {
        Ok(()) => {}
        Err(e) => {
            eprintln!("{:?}", miette::Report::new(e));
        }
    }
}

fn run() -> Result<(), HyperError> {
    let search = new_descriptor(
        "search",
        None,
        [
            alps::Element::Type(Control::Safe),
            alps::Element::from(Doc::new(None, Format::Text, "input for searching")),
        ],
    )?;
    let contacts = new_descriptor("contacts", None, [alps::Element::from(search)])?;
    let profile = new_profile([
        alps::Element::from(Doc::new(None, Format::Text, "List of contacts w/ search")),
        alps::Element::from(contacts),
    ])?;
    println!("{}", profile.to_json_pretty().unwrap());

    let href = Url::parse("http://example.org/friends/search").unwrap();
    let query = new_query(
        href,
        "search",
        "by-name",
        "Search",
        [collection::Element::from(Datum::new("name", "", "Name"))],
    )?;
    let document = new_collection([collection::Element::from(query)])?;
    let json = document.to_json().unwrap();
    println!("{json}");

    let parsed = parse_collection(json.as_bytes())?;
    for query in parsed.query(&["search"]) {
        let mut query = query.clone();
        query.set("name", "jdoe");
        println!("{}", query.uri()?);
    }
    Ok(())
}
