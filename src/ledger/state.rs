use crate::model::{Friend, FriendId};

/// Friends in insertion order. Lookups are linear.
#[derive(Debug, Default)]
pub struct FriendList {
    friends: Vec<Friend>,
}

impl FriendList {
    pub fn iter(&self) -> impl Iterator<Item = &Friend> + '_ {
        self.friends.iter()
    }

    pub fn len(&self) -> usize {
        self.friends.len()
    }

    pub fn get(&self, id: FriendId) -> Option<&Friend> {
        self.friends.iter().find(|f| f.id() == id)
    }

    pub fn get_mut(&mut self, id: FriendId) -> Option<&mut Friend> {
        self.friends.iter_mut().find(|f| f.id() == id)
    }

    /// First friend whose name matches exactly.
    pub fn find_by_name(&self, name: &str) -> Option<&Friend> {
        self.friends.iter().find(|f| f.name() == name)
    }

    pub fn push(&mut self, friend: Friend) {
        self.friends.push(friend);
    }

    pub fn remove(&mut self, id: FriendId) -> Option<Friend> {
        let idx = self.friends.iter().position(|f| f.id() == id)?;
        Some(self.friends.remove(idx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Amount;

    fn list(names: &[&str]) -> FriendList {
        let mut list = FriendList::default();
        for (idx, name) in names.iter().enumerate() {
            list.push(Friend::new(
                FriendId::new(idx as u64 + 1),
                name.to_string(),
                Amount::ZERO,
            ));
        }
        list
    }

    #[test]
    fn keeps_insertion_order() {
        let list = list(&["John", "Alice", "Bob"]);
        let names: Vec<_> = list.iter().map(Friend::name).collect();
        assert_eq!(names, ["John", "Alice", "Bob"]);
    }

    #[test]
    fn remove_preserves_order_of_the_rest() {
        let mut list = list(&["John", "Alice", "Bob"]);
        let removed = list.remove(FriendId::new(2)).unwrap();
        assert_eq!(removed.name(), "Alice");

        let names: Vec<_> = list.iter().map(Friend::name).collect();
        assert_eq!(names, ["John", "Bob"]);
        assert!(list.remove(FriendId::new(2)).is_none());
    }

    #[test]
    fn find_by_name_returns_first_match() {
        let list = list(&["John", "John"]);
        assert_eq!(list.find_by_name("John").unwrap().id(), FriendId::new(1));
        assert!(list.find_by_name("john").is_none());
    }
}
