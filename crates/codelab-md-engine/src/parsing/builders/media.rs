//! Images and embeds.
//!
//! An image whose alt text is a video watch URL becomes a video embed; one
//! whose alt text is an https URL on an allowed domain becomes a frame. Any
//! other image needs a source.

use log::debug;
use url::Url;

use super::non_blank_attr;
use crate::models::{EmbedNode, EmbedTarget, ImageNode, Node, NodeMeta};
use crate::parsing::walker::Walker;

const VIDEO_WATCH: &str = "youtube.com/watch";

impl Walker<'_> {
    pub(crate) fn image(&mut self) -> Option<Node> {
        let tree = self.tree;
        let id = self.cur;
        let alt = tree.attr(id, "alt").unwrap_or_default().trim();

        if alt.contains(VIDEO_WATCH) {
            return video_from_watch_url(alt);
        }
        if alt.contains("https://")
            && let Ok(url) = Url::parse(alt)
            && url
                .host_str()
                .is_some_and(|host| self.opts.allows_frame(host))
        {
            return frame(url);
        }

        let Some(src) = non_blank_attr(tree, id, "src") else {
            debug!("skipping image without a source");
            return None;
        };
        let width = match non_blank_attr(tree, id, "width") {
            Some(w) => match w.parse::<f32>() {
                Ok(w) => Some(w),
                Err(_) => {
                    debug!("skipping image {src} with malformed width {w:?}");
                    return None;
                }
            },
            None => None,
        };

        Some(Node::Image(ImageNode {
            meta: NodeMeta::in_block(self.block_of(id)),
            src: src.to_string(),
            alt: Some(alt).filter(|a| !a.is_empty()).map(String::from),
            title: non_blank_attr(tree, id, "title").map(String::from),
            width,
        }))
    }

    /// Builds a video embed from a `<video id="...">` element.
    pub(crate) fn video(&mut self) -> Option<Node> {
        let id = non_blank_attr(self.tree, self.cur, "id")?;
        Some(embed(EmbedTarget::Video { id: id.to_string() }))
    }
}

fn embed(target: EmbedTarget) -> Node {
    Node::Embed(EmbedNode {
        meta: NodeMeta::default(),
        target,
    })
}

fn video_from_watch_url(alt: &str) -> Option<Node> {
    let url = Url::parse(alt).ok()?;
    let id = url
        .query_pairs()
        .find(|(key, _)| key == "v")
        .map(|(_, value)| value.into_owned())
        .filter(|v| !v.is_empty())?;
    Some(embed(EmbedTarget::Video { id }))
}

fn frame(url: Url) -> Option<Node> {
    if url.scheme() != "https" {
        debug!("refusing to frame non-https url {url}");
        return None;
    }
    Some(embed(EmbedTarget::Frame {
        url: url.to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use crate::models::{EmbedTarget, Node};
    use crate::tests::{flatten, step_content};
    use pretty_assertions::assert_eq;

    fn single(body: &str) -> Option<Node> {
        flatten(&step_content(body))
            .into_iter()
            .find(|n| matches!(n, Node::Image(_) | Node::Embed(_)))
            .cloned()
    }

    #[test]
    fn plain_image_keeps_attributes() {
        let Some(Node::Image(img)) = single("![A cat](img/cat.png \"Cat\")") else {
            panic!("expected image");
        };
        assert_eq!(img.src, "img/cat.png");
        assert_eq!(img.alt.as_deref(), Some("A cat"));
        assert_eq!(img.title.as_deref(), Some("Cat"));
        assert_eq!(img.width, None);
    }

    #[test]
    fn width_is_parsed_and_malformed_width_drops_the_image() {
        let Some(Node::Image(img)) = single("<img src=\"a.png\" width=\"320.5\">") else {
            panic!("expected image");
        };
        assert_eq!(img.width, Some(320.5));
        assert_eq!(single("<img src=\"a.png\" width=\"wide\">"), None);
    }

    #[test]
    fn image_without_source_is_dropped() {
        assert_eq!(single("<img alt=\"nothing\">"), None);
    }

    #[test]
    fn watch_url_alt_becomes_video() {
        let Some(Node::Embed(embed)) =
            single("![https://www.youtube.com/watch?v=dQw4w9WgXcQ](thumb.png)")
        else {
            panic!("expected embed");
        };
        assert_eq!(
            embed.target,
            EmbedTarget::Video {
                id: "dQw4w9WgXcQ".into()
            }
        );
    }

    #[test]
    fn allowed_https_alt_becomes_frame() {
        let Some(Node::Embed(embed)) = single("![https://codepen.io/team/pen/abc](shot.png)")
        else {
            panic!("expected embed");
        };
        assert_eq!(
            embed.target,
            EmbedTarget::Frame {
                url: "https://codepen.io/team/pen/abc".into()
            }
        );
    }

    #[test]
    fn unlisted_domain_stays_an_image() {
        let Some(Node::Image(img)) = single("![https://evil.example/x](shot.png)") else {
            panic!("expected image");
        };
        assert_eq!(img.src, "shot.png");
    }

    #[test]
    fn plain_http_frame_on_allowed_domain_is_dropped() {
        assert!(step_content("![http://codepen.io/pen?u=https://x](shot.png)").is_empty());
    }

    #[test]
    fn video_element_becomes_embed() {
        let Some(Node::Embed(embed)) = single("<video id=\"abc123\"></video>") else {
            panic!("expected embed");
        };
        assert_eq!(embed.target, EmbedTarget::Video { id: "abc123".into() });
    }
}
