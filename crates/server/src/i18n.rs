//! Localized user-facing text.
//!
//! Only two locales exist, so strings live in code rather than in catalog
//! files. `Locale::Fa` is the default.

use vitrine_core::Locale;

/// Messages shown in flash banners or inline on forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    InvalidCredentials,
    ProductAdded,
    ProductDeleted,
    ImageRequired,
}

impl Message {
    #[must_use]
    pub const fn text(self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Self::InvalidCredentials, Locale::Fa) => "نام کاربری یا رمز عبور اشتباه است",
            (Self::InvalidCredentials, Locale::En) => "Invalid username or password",
            (Self::ProductAdded, Locale::Fa) => "محصول با موفقیت اضافه شد",
            (Self::ProductAdded, Locale::En) => "Product added",
            (Self::ProductDeleted, Locale::Fa) => "محصول حذف شد",
            (Self::ProductDeleted, Locale::En) => "Product deleted",
            (Self::ImageRequired, Locale::Fa) => "لطفاً یک تصویر برای محصول انتخاب کنید",
            (Self::ImageRequired, Locale::En) => "Please choose an image for the product",
        }
    }
}

/// Static page labels for one locale.
#[derive(Debug)]
pub struct UiText {
    pub lang: &'static str,
    pub dir: &'static str,
    pub site_title: &'static str,
    pub products: &'static str,
    pub no_products: &'static str,
    pub admin_panel: &'static str,
    pub view_site: &'static str,
    pub login: &'static str,
    pub logout: &'static str,
    pub username: &'static str,
    pub password: &'static str,
    pub add_product: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub price: &'static str,
    pub image: &'static str,
    pub delete: &'static str,
}

static FA: UiText = UiText {
    lang: "fa",
    dir: "rtl",
    site_title: "ویترین",
    products: "محصولات",
    no_products: "هنوز محصولی ثبت نشده است",
    admin_panel: "پنل مدیریت",
    view_site: "مشاهده سایت",
    login: "ورود",
    logout: "خروج",
    username: "نام کاربری",
    password: "رمز عبور",
    add_product: "افزودن محصول",
    name: "نام",
    description: "توضیحات",
    price: "قیمت",
    image: "تصویر",
    delete: "حذف",
};

static EN: UiText = UiText {
    lang: "en",
    dir: "ltr",
    site_title: "Vitrine",
    products: "Products",
    no_products: "No products yet.",
    admin_panel: "Admin panel",
    view_site: "View site",
    login: "Log in",
    logout: "Log out",
    username: "Username",
    password: "Password",
    add_product: "Add product",
    name: "Name",
    description: "Description",
    price: "Price",
    image: "Image",
    delete: "Delete",
};

impl UiText {
    #[must_use]
    pub fn for_locale(locale: Locale) -> &'static Self {
        match locale {
            Locale::Fa => &FA,
            Locale::En => &EN,
        }
    }
}
