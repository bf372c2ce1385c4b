use vellum::{obj_upcast, two::Image, Obj, WeakObj};

use crate::button::{ButtonBase, ButtonEvent, ButtonId, ButtonObserver};

struct Member {
    id: ButtonId,
    button: WeakObj<dyn ButtonBase>,
}

/// Radio-style group: pressing one member releases all the others.
///
/// The group does not own its members. It subscribes to each of them, so it
/// must live in an [`Obj`]; use [`OptionButtonGroup::new`].
pub struct OptionButtonGroup {
    members: Vec<Member>,
    this: Option<WeakObj<dyn ButtonObserver>>,
}

impl OptionButtonGroup {
    pub fn new() -> Obj<Self> {
        let group = Obj::new(OptionButtonGroup {
            members: Vec::new(),
            this: None,
        });
        group.get_mut().this = Some(obj_upcast!(group));
        group
    }

    /// Adds a member and subscribes to it. A button that no longer exists is
    /// ignored.
    pub fn add_button(&mut self, button: WeakObj<dyn ButtonBase>) {
        let Some(obj) = button.try_upgrade() else {
            return;
        };
        let mut guard = obj.get_mut();
        if let Some(this) = &self.this {
            guard.subscribe(this.clone());
        }
        self.members.push(Member {
            id: guard.id(),
            button,
        });
    }

    pub fn draw(&self, output: &mut Image) {
        for member in &self.members {
            if let Some(button) = member.button.try_upgrade() {
                button.get().draw(output);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl ButtonObserver for OptionButtonGroup {
    fn sender_update(&mut self, event: &ButtonEvent) {
        if !event.pressed {
            return;
        }
        log::trace!("Option {:?} pressed, releasing the rest", event.sender);

        // The sender is mutably borrowed by whoever pressed it.
        let others: Vec<_> = self
            .members
            .iter()
            .filter(|member| member.id != event.sender)
            .filter_map(|member| member.button.try_upgrade())
            .collect();
        // Releasing a member must not call back into this group.
        for button in &others {
            button.get_mut().unsubscribe();
        }
        for button in &others {
            button.get_mut().release();
        }
        if let Some(this) = &self.this {
            for button in &others {
                button.get_mut().subscribe(this.clone());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::button::{
        tests::{solid, PRESSED, RELEASED},
        ButtonSprite,
    };
    use vellum::two::Sprite;

    fn option(x: i32) -> Obj<ButtonSprite> {
        Obj::new(ButtonSprite::new(
            x,
            0,
            solid(4, 4, RELEASED),
            solid(4, 4, PRESSED),
            Sprite::default(),
        ))
    }

    #[test]
    fn pressing_one_option_releases_the_others() {
        let (a, b, c) = (option(0), option(4), option(8));
        let group = OptionButtonGroup::new();
        for button in [&a, &b, &c] {
            group.get_mut().add_button(obj_upcast!(button));
        }
        assert_eq!(group.get().len(), 3);

        a.get_mut().press();
        assert!(a.get().is_pressed());

        b.get_mut().press();
        assert!(a.get().is_released());
        assert!(b.get().is_pressed());
        assert!(c.get().is_released());
        assert!(a.get().is_subscribed() && c.get().is_subscribed());

        let mut surface = Image::new(12, 4);
        group.get().draw(&mut surface);
        assert_eq!(surface.pixel(1, 1), RELEASED);
        assert_eq!(surface.pixel(5, 1), PRESSED);
    }

    #[test]
    fn releasing_does_not_touch_the_others() {
        let (a, b) = (option(0), option(4));
        let group = OptionButtonGroup::new();
        group.get_mut().add_button(obj_upcast!(a));
        group.get_mut().add_button(obj_upcast!(b));

        a.get_mut().press();
        b.get_mut().release();
        assert!(a.get().is_pressed());
    }

    #[test]
    fn dead_members_are_skipped() {
        let group = OptionButtonGroup::new();
        let gone = option(0);
        let weak: WeakObj<dyn ButtonBase> = obj_upcast!(gone);
        drop(gone);
        group.get_mut().add_button(weak);
        assert!(group.get().is_empty());

        let (a, b) = (option(0), option(4));
        group.get_mut().add_button(obj_upcast!(a));
        group.get_mut().add_button(obj_upcast!(b));
        drop(a);
        b.get_mut().press();
        assert!(b.get().is_pressed());
        assert_eq!(group.get().len(), 2);
    }
}
