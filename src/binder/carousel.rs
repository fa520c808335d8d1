//! Two-slot gallery carousel state

/// Which of the two image slots is opaque
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    First,
    Second,
}

/// Current gallery index, always in `0..len`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Carousel {
    len: usize,
    index: usize,
}

impl Carousel {
    /// `None` for an empty gallery.
    pub fn new(len: usize) -> Option<Self> {
        (len > 0).then_some(Self { len, index: 0 })
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn next(&mut self) -> usize {
        self.index = (self.index + 1) % self.len;
        self.index
    }

    pub fn prev(&mut self) -> usize {
        self.index = (self.index + self.len - 1) % self.len;
        self.index
    }

    /// Index 0 shows the first slot, any other index the second.
    pub fn visible_slot(&self) -> Slot {
        if self.index == 0 {
            Slot::First
        } else {
            Slot::Second
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_gallery_has_no_carousel() {
        assert!(Carousel::new(0).is_none());
    }

    #[test]
    fn wraps_in_both_directions() {
        let mut carousel = Carousel::new(2).unwrap();
        assert_eq!(carousel.visible_slot(), Slot::First);
        assert_eq!(carousel.next(), 1);
        assert_eq!(carousel.visible_slot(), Slot::Second);
        assert_eq!(carousel.next(), 0);
        assert_eq!(carousel.prev(), 1);
        assert_eq!(carousel.prev(), 0);
    }

    #[test]
    fn single_image_never_moves() {
        let mut carousel = Carousel::new(1).unwrap();
        assert_eq!(carousel.next(), 0);
        assert_eq!(carousel.prev(), 0);
        assert_eq!(carousel.visible_slot(), Slot::First);
    }

    #[test]
    fn index_stays_in_bounds_for_any_click_sequence() {
        for len in 1..5 {
            let mut carousel = Carousel::new(len).unwrap();
            for step in 0..20 {
                if step % 3 == 0 {
                    carousel.prev();
                } else {
                    carousel.next();
                }
                assert!(carousel.index() < len);
            }
        }
    }
}
