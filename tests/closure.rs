#[macro_use]
mod common;

#[cfg(test)]
mod closure {
    tests! {
        close_over_function_parameter is OK
        r#"
            fun f(param) {
                fun g() { print param; }
                return g;
            }
            var g = f("param");
            g();
        "# => "param"
    }

    tests! {
        close_over_later_variable is OK
        r#"
            var f;
            {
                var a = "a";
                fun g() { print a; }
                f = g;
                var b = "b";
            }
            f();
        "# => "a"
    }

    tests! {
        nested_closures_each_capture_their_own_scope is OK
        r#"
            fun outer() {
                var a = "a";
                fun middle() {
                    var b = "b";
                    fun inner() {
                        print a;
                        print b;
                    }
                    inner();
                }
                middle();
            }
            outer();
        "# => "a", "b"
    }

    tests! {
        assignment_through_closure_is_visible_to_later_calls is OK
        r#"
            fun make_counter() {
                var count = 0;
                fun counter() {
                    count = count + 1;
                    return count;
                }
                return counter;
            }
            var counter = make_counter();
            print counter();
            print counter();
            print counter();
        "# => "1", "2", "3"
    }

    tests! {
        closure_captures_declaration_site_not_call_site is OK
        r#"
            var a = "global";
            {
                fun showA() { print a; }
                showA();
                var a = "block";
                showA();
            }
        "# => "global", "global"
    }

    tests! {
        shadowing_a_captured_name_with_a_local_does_not_affect_the_closure is OK
        r#"
            var a = "closure";
            fun f() { print a; }
            {
                var a = "shadow";
                f();
                print a;
            }
            f();
        "# => "closure", "shadow", "closure"
    }
}
