use yew::{Children, Html, Properties, classes, function_component, html};

use crate::components::navbar::Navbar;

#[derive(Properties, PartialEq)]
pub struct LayoutProps {
    pub children: Children,
}

#[function_component(Layout)]
pub fn layout(props: &LayoutProps) -> Html {
    html! {
        <div class="min-h-screen flex flex-col bg-base-100">
            <Navbar />
            <main class={classes!("flex-grow", "container", "mx-auto", "p-4")}>
                { props.children.clone() }
            </main>
            <footer class="footer footer-center p-4 border-t border-base-300 text-base-content">
                <p>{"IPHMS · Integrated Patient Health Monitoring"}</p>
            </footer>
        </div>
    }
}
