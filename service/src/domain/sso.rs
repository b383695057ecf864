//! Single sign-on definitions.

use common::define_kind;

define_kind! {
    #[doc = "Identity provider a user may delegate authentication to."]
    enum Provider {
        #[doc = "Google account."]
        #[label = "Google"]
        Google,

        #[doc = "Microsoft account."]
        #[label = "Microsoft"]
        Microsoft,

        #[doc = "GitHub account."]
        #[label = "GitHub"]
        Github,
    }
}
