//! News cards
//!
//! Fills the index page's card grid and the news page's article list from
//! an in-memory item list. Item fields always become text nodes, so markup
//! inside a title or summary is shown literally.

use serde::{Deserialize, Serialize};
use tracing::debug;
use vitrine_dom::{Document, DomResult, DomTree, NodeId};

use crate::config::NewsConfig;

/// One news entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsItem {
    pub id: u32,
    pub title: String,
    pub date: String,
    pub summary: String,
}

impl NewsItem {
    fn new(id: u32, title: &str, date: &str, summary: &str) -> Self {
        Self {
            id,
            title: title.to_string(),
            date: date.to_string(),
            summary: summary.to_string(),
        }
    }
}

/// Built-in sample items
pub fn sample_news() -> Vec<NewsItem> {
    vec![
        NewsItem::new(
            1,
            "NHREC releases new ethics guideline",
            "2025-10-01",
            "Summary of the guideline and its scope.",
        ),
        NewsItem::new(
            2,
            "Call for research proposals on public health ethics",
            "2025-09-12",
            "Open call for proposals and funding opportunities.",
        ),
        NewsItem::new(
            3,
            "Committee meeting minutes published",
            "2025-08-25",
            "Minutes of the last NHREC meeting are now available.",
        ),
    ]
}

/// Append `<tag>text</tag>` to `parent`
fn append_element(tree: &mut DomTree, parent: NodeId, tag: &str, text: &str) -> DomResult<NodeId> {
    let elem = tree.create_element(tag);
    tree.set_text_content(elem, text)?;
    tree.append_child(parent, elem)?;
    Ok(elem)
}

/// Append `<p><a href="..">label</a></p>` to `parent`
fn append_link(tree: &mut DomTree, parent: NodeId, href: &str, label: &str) -> DomResult<()> {
    let p = append_element(tree, parent, "p", "")?;
    let a = append_element(tree, p, "a", label)?;
    tree.set_attribute(a, "href", href)
}

/// Render the first `grid_limit` items as `div.card`s into the index grid.
/// Returns the number of cards rendered (0 when the grid is absent).
pub fn populate_index_news(doc: &mut Document, config: &NewsConfig) -> DomResult<usize> {
    let Some(grid) = doc.get_element_by_id(&config.grid_id) else {
        return Ok(0);
    };
    let tree = doc.tree_mut();

    let items = config.items.iter().take(config.grid_limit);
    let mut rendered = 0;
    for item in items {
        let card = tree.create_element("div");
        tree.set_attribute(card, "class", "card")?;
        append_element(tree, card, "h4", &item.title)?;
        let date = append_element(tree, card, "p", "")?;
        append_element(tree, date, "small", &item.date)?;
        append_element(tree, card, "p", &item.summary)?;
        append_link(tree, card, "news.html", "Read more")?;
        tree.append_child(grid, card)?;
        rendered += 1;
    }

    debug!("Rendered {} news cards into #{}", rendered, config.grid_id);
    Ok(rendered)
}

/// Render every item as an `article.card` into the news page list.
/// Returns the number of articles rendered (0 when the list is absent).
pub fn populate_news_page(doc: &mut Document, config: &NewsConfig) -> DomResult<usize> {
    let Some(list) = doc.get_element_by_id(&config.list_id) else {
        return Ok(0);
    };
    let tree = doc.tree_mut();

    for item in &config.items {
        let article = tree.create_element("article");
        tree.set_attribute(article, "class", "card")?;
        append_element(tree, article, "h3", &item.title)?;
        append_element(tree, article, "small", &item.date)?;
        append_element(tree, article, "p", &item.summary)?;
        append_link(tree, article, "#", "Read full article")?;
        tree.append_child(list, article)?;
    }

    debug!("Rendered {} news articles into #{}", config.items.len(), config.list_id);
    Ok(config.items.len())
}
