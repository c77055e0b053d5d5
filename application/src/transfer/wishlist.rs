use kernel::prelude::entity::{DestructWishlist, DestructWishlistItem, Wishlist, WishlistItem};

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct WishlistItemDto {
    pub id: i64,
    pub wishlist_id: i64,
    pub book_id: i64,
    pub qty: i32,
}

impl From<WishlistItem> for WishlistItemDto {
    fn from(value: WishlistItem) -> Self {
        let DestructWishlistItem {
            id,
            wishlist_id,
            book_id,
            qty,
        } = value.into_destruct();
        Self {
            id: id.into(),
            wishlist_id: wishlist_id.into(),
            book_id: book_id.into(),
            qty: qty.into(),
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct WishlistDto {
    pub id: i64,
    pub customer_id: i64,
    pub items: Vec<WishlistItemDto>,
}

impl From<Wishlist> for WishlistDto {
    fn from(value: Wishlist) -> Self {
        let DestructWishlist {
            id,
            customer_id,
            items,
        } = value.into_destruct();
        Self {
            id: id.into(),
            customer_id: customer_id.into(),
            items: items.into_iter().map(WishlistItemDto::from).collect(),
        }
    }
}

pub struct GetWishlistDto {
    pub id: i64,
}

pub struct CreateWishlistDto {
    pub customer_id: i64,
}

pub struct DeleteWishlistDto {
    pub id: i64,
}

pub struct AddWishlistItemDto {
    pub wishlist_id: i64,
    pub book_id: i64,
    pub qty: i32,
}

pub struct DeleteWishlistItemDto {
    pub wishlist_id: i64,
    pub item_id: i64,
}

pub struct GiftDto {
    pub wishlist_id: i64,
    pub buyer_id: i64,
}
