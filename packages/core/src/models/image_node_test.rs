//! Tests for ImageNode

#[cfg(test)]
mod tests {
    use crate::models::{ImageNode, Node, DEFAULT_MAX_WIDTH};

    #[test]
    fn test_image_export_dom() {
        let image = ImageNode::new("https://a.test/cat.png", "A cat").with_size(320, 0);
        assert_eq!(
            Node::Image(image).export_dom().to_html(),
            "<img src=\"https://a.test/cat.png\" alt=\"A cat\" width=\"320\">"
        );

        let unsafe_image = ImageNode::new("javascript:alert(1)", "");
        assert_eq!(unsafe_image.export_dom().attribute("src"), Some("#"));
    }

    #[test]
    fn test_image_defaults() {
        let image = ImageNode::default();
        assert_eq!(image.max_width, DEFAULT_MAX_WIDTH);
        assert_eq!(image.version, 1);
        assert_eq!(Node::Image(image).text_content(), "");
    }
}
